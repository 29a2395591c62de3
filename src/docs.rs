// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Bookings ---
        handlers::bookings::create_booking,
        handlers::bookings::list_bookings,
        handlers::bookings::get_booking,
        handlers::bookings::update_booking_status,
        handlers::bookings::delete_booking,

        // --- Services ---
        handlers::catalog::create_service,
        handlers::catalog::list_services,
        handlers::catalog::list_services_by_category,
        handlers::catalog::get_service,
        handlers::catalog::update_service,
        handlers::catalog::delete_service,

        // --- Employees ---
        handlers::employees::create_employee,
        handlers::employees::list_employees,
        handlers::employees::get_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,
        handlers::employees::record_payment,
        handlers::employees::monthly_reset,

        // --- Testimonials / Queries ---
        handlers::intake::create_testimonial,
        handlers::intake::list_testimonials,
        handlers::intake::submit_query,
        handlers::intake::list_queries,
        handlers::intake::update_query_status,

        // --- Payments ---
        handlers::payments::create_order,
        handlers::payments::get_key,
        handlers::payments::verify_payment,

        // --- Users / Admin ---
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::forget_password,
        handlers::auth::get_user_info,
        handlers::auth::get_all_users,
        handlers::auth::delete_user,
        handlers::auth::admin_signup,
        handlers::auth::admin_login,
    ),
    components(
        schemas(
            // --- Bookings ---
            models::booking::Booking,
            models::booking::BookingStatus,
            models::booking::BookedService,
            models::booking::BookingWithServices,
            models::booking::BookingCreated,
            models::booking::CreateBookingPayload,
            models::booking::UpdateBookingStatusPayload,

            // --- Services ---
            models::catalog::Service,
            models::catalog::ServiceStatus,
            handlers::catalog::ServiceMultipart,

            // --- Employees ---
            models::payroll::Employee,
            models::payroll::SalaryStatus,
            models::payroll::EntryKind,
            models::payroll::PaymentEntry,
            models::payroll::CreateEmployeePayload,
            models::payroll::UpdateEmployeePayload,
            models::payroll::RecordPaymentPayload,
            models::payroll::MonthlyResetPayload,
            models::payroll::MonthlyResetResponse,

            // --- Intake ---
            models::intake::Testimonial,
            models::intake::CreateTestimonialPayload,
            models::intake::QueryStatus,
            models::intake::UserQueryView,
            models::intake::SubmitQueryPayload,
            models::intake::UpdateQueryStatusPayload,

            // --- Payments ---
            models::payment::CreateOrderPayload,
            models::payment::GatewayOrder,
            models::payment::CreateOrderResponse,
            models::payment::PaymentKeyResponse,
            models::payment::VerifyPaymentPayload,
            models::payment::VerifyPaymentResponse,

            // --- Auth ---
            models::auth::User,
            models::auth::Admin,
            models::auth::Role,
            models::auth::UserSignupPayload,
            models::auth::LoginPayload,
            models::auth::ForgetPasswordPayload,
            models::auth::AdminSignupPayload,
            models::auth::UserAuthResponse,
            models::auth::AdminAuthResponse,
            models::auth::MessageResponse,
        )
    ),
    tags(
        (name = "Health", description = "Estado da API"),
        (name = "Bookings", description = "Agendamentos de serviços"),
        (name = "Services", description = "Catálogo de serviços"),
        (name = "Employees", description = "Funcionários e folha de pagamento"),
        (name = "Testimonials", description = "Depoimentos públicos"),
        (name = "User Queries", description = "Pedidos de retorno"),
        (name = "Payments", description = "Ponte com o gateway de pagamento"),
        (name = "Users", description = "Contas de clientes"),
        (name = "Admin", description = "Contas do back office")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
