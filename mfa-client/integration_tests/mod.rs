mod auth;
mod dispatch;
mod helpers;
mod users;
