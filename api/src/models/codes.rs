//! Application codes carried in the envelope's `code` field.

use cvs_client::ClassifiedError;
use cvs_client::ErrorKind;

pub const USER_NOT_FOUND: i64 = 1001;
pub const USER_ALREADY_EXISTS: i64 = 1002;
pub const INVALID_CREDENTIALS: i64 = 1003;
pub const ACCOUNT_DISABLED: i64 = 1004;
pub const TOKEN_EXPIRED: i64 = 1005;
pub const TOKEN_INVALID: i64 = 1006;
/// Classified as [`ErrorKind::Forbidden`], not as a business error.
pub const INSUFFICIENT_PERMISSIONS: i64 = 1007;

pub const ACTIVITY_NOT_FOUND: i64 = 2001;
pub const ACTIVITY_FULL: i64 = 2002;
pub const ACTIVITY_EXPIRED: i64 = 2003;
pub const ACTIVITY_NOT_PUBLISHED: i64 = 2004;
pub const ALREADY_SIGNED_UP: i64 = 2005;
pub const SIGNUP_NOT_FOUND: i64 = 2006;
pub const SIGNUP_NOT_APPROVED: i64 = 2007;
pub const CANNOT_CANCEL_ACTIVITY: i64 = 2008;

pub const CERTIFICATE_NOT_FOUND: i64 = 3001;
pub const CERTIFICATE_ALREADY_APPROVED: i64 = 3002;
pub const INSUFFICIENT_SERVICE_HOURS: i64 = 3003;

pub const FILE_UPLOAD_ERROR: i64 = 4001;
pub const FILE_TYPE_NOT_SUPPORTED: i64 = 4002;
pub const FILE_SIZE_EXCEEDED: i64 = 4003;

/// The application code of a business failure, if `error` is one.
pub fn business_code(error: &ClassifiedError) -> Option<i64> {
    match error.kind {
        ErrorKind::BusinessError(code) => Some(code),
        _ => None,
    }
}

/// Whether a failed signup should be presented as "no seats left".
pub fn is_capacity_error(error: &ClassifiedError) -> bool {
    matches!(business_code(error), Some(ACTIVITY_FULL | ACTIVITY_EXPIRED))
}
