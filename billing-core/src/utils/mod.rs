pub mod numeric;

pub use numeric::{format_money, parse_amount, round_money};
