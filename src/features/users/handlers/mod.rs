pub mod user_handler;

pub use user_handler::{
    __path_check_email_availability, __path_fetch_user, __path_login, __path_register_user,
    __path_upload_avatar, check_email_availability, fetch_user, login, register_user,
    upload_avatar,
};
