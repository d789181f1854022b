pub mod p900_price_history;
