pub mod u501_quotation;
