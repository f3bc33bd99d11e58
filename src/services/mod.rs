//! Business logic services.
//!
//! Handlers stay thin; everything that touches the database or a credential
//! lives here.

mod helpers;

pub mod auth;
pub mod links;

pub use auth::{issue_token, login_user, register_user, verify_token, Claims};
pub use links::{
    create_link, delete_link, link_details, list_links, resolve_redirect, update_link,
    verify_link_password, RedirectTarget,
};
