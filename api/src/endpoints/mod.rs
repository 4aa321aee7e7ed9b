//! One handle per backend resource.
//!
//! Handles borrow the [`CvsClient`] and are cheap to create; obtain them from
//! [`crate::CvsApi`].

mod activities;
mod auth;
mod certificates;
mod check;
mod mall;
mod notifications;
mod points;
mod reviews;
mod roles;
mod service_records;
mod signups;
mod statistics;
mod users;

pub use activities::ActivitiesApi;
pub use auth::AuthApi;
pub use certificates::CertificatesApi;
pub use check::CheckApi;
pub use mall::MallApi;
pub use notifications::NotificationsApi;
pub use points::PointsApi;
pub use reviews::ReviewsApi;
pub use roles::RolesApi;
pub use service_records::ServiceRecordsApi;
pub use signups::SignupsApi;
pub use statistics::StatisticsApi;
pub use users::UsersApi;

use cvs_client::RequestSpec;

use crate::models::Paging;

/// `page`/`size` query parameters of the `GET` listings.
fn paged(request: RequestSpec, paging: Paging) -> RequestSpec {
    request.query("page", paging.page).query("size", paging.size)
}
