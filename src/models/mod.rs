pub mod dashboard_model;
