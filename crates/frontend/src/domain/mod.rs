pub mod a001_travel_request;
pub mod a002_voucher;
pub mod a003_travel_agency;
