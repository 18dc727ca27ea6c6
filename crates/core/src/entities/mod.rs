mod connectivity;
mod currency;
mod order_status;
mod side;

pub use connectivity::ConnectivityStatus;
pub use currency::{Currency, CurrencyPair};
pub use order_status::OrderStatus;
pub use side::Side;
