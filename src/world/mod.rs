pub mod person;
pub mod population;

#[cfg(test)]
pub mod test_support;

pub use person::{Person, Realm, Unit};
pub use population::Population;
