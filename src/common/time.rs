// src/common/time.rs
//
// O back office registra data/hora dos pagamentos no horário da Índia (IST, UTC+05:30).
// IST não tem horário de verão, então um offset fixo basta.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Carimbo de data/hora de um lançamento no histórico de pagamentos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStamp {
    pub date: String,       // "16-10-2026"
    pub time: String,       // "02:05 pm"
    pub month_year: String, // "10-2026"
    pub timestamp: DateTime<Utc>,
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub fn ledger_stamp(now: DateTime<Utc>) -> LedgerStamp {
    let local = now.with_timezone(&ist());
    LedgerStamp {
        date: local.format("%d-%m-%Y").to_string(),
        time: local.format("%I:%M %P").to_string(),
        month_year: format!("{}-{}", local.month(), local.year()),
        timestamp: now,
    }
}

/// Valida e normaliza um "M-YYYY" (ex: "03-2026" vira "3-2026").
pub fn parse_month_year(value: &str) -> Option<String> {
    let (month, year) = value.trim().split_once('-')?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if !(1..=12).contains(&month) || !(2000..=9999).contains(&year) {
        return None;
    }
    Some(format!("{}-{}", month, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stamp_is_rendered_in_ist() {
        // 18:45 UTC = 00:15 do dia seguinte em IST
        let now = Utc.with_ymd_and_hms(2026, 10, 31, 18, 45, 0).unwrap();
        let stamp = ledger_stamp(now);

        assert_eq!(stamp.date, "01-11-2026");
        assert_eq!(stamp.time, "12:15 am");
        assert_eq!(stamp.month_year, "11-2026");
        assert_eq!(stamp.timestamp, now);
    }

    #[test]
    fn month_year_is_normalized() {
        assert_eq!(parse_month_year("10-2026").as_deref(), Some("10-2026"));
        assert_eq!(parse_month_year("03-2026").as_deref(), Some("3-2026"));
        assert_eq!(parse_month_year("13-2026"), None);
        assert_eq!(parse_month_year("October 2026"), None);
        assert_eq!(parse_month_year(""), None);
    }
}
