mod admin;
pub use admin::AdminDashboard;

mod user;
pub use user::UserDashboard;

mod register;
pub use register::Register;
