pub mod finance_report;
pub mod login;
pub mod parent;
pub mod payment_status;
pub mod register;
pub mod stat_tutor;
pub mod tutor_home;
