pub mod staff_auth;

pub use staff_auth::staff_auth_middleware;
