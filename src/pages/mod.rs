pub mod home;
pub mod resell;
