//! Twelve-month money series

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::ops::{Index, IndexMut};

use crate::models::{Money, Month};

/// One amount per calendar month, January first
///
/// Every month is always present; months with nothing charged hold zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlySeries([Money; 12]);

impl MonthlySeries {
    /// All twelve months zero
    pub const fn zero() -> Self {
        Self([Money::zero(); 12])
    }

    /// The same amount in every month
    pub const fn uniform(amount: Money) -> Self {
        Self([amount; 12])
    }

    pub fn get(&self, month: Month) -> Money {
        self.0[month.index()]
    }

    /// Iterate `(month, amount)` pairs in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (Month, Money)> + '_ {
        Month::all().map(move |m| (m, self.get(m)))
    }

    pub fn values(&self) -> &[Money; 12] {
        &self.0
    }

    /// Sum of the twelve months, exact in cents
    pub fn total(&self) -> Money {
        self.0.iter().sum()
    }

    /// Month-by-month sum of two series
    pub fn add(&self, other: &MonthlySeries) -> MonthlySeries {
        let mut out = *self;
        for (slot, value) in out.0.iter_mut().zip(other.0.iter()) {
            *slot += *value;
        }
        out
    }

    /// Month-by-month difference `self - other`
    pub fn sub(&self, other: &MonthlySeries) -> MonthlySeries {
        let mut out = *self;
        for (slot, value) in out.0.iter_mut().zip(other.0.iter()) {
            *slot -= *value;
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Money::is_zero)
    }
}

impl Index<Month> for MonthlySeries {
    type Output = Money;

    fn index(&self, month: Month) -> &Money {
        &self.0[month.index()]
    }
}

impl IndexMut<Month> for MonthlySeries {
    fn index_mut(&mut self, month: Month) -> &mut Money {
        &mut self.0[month.index()]
    }
}

impl<'a> std::iter::Sum<&'a MonthlySeries> for MonthlySeries {
    fn sum<I: Iterator<Item = &'a MonthlySeries>>(iter: I) -> Self {
        iter.fold(MonthlySeries::zero(), |acc, s| acc.add(s))
    }
}

/// Serialized as a map from month number to hundredths (`{"1": 10000, ...}`)
impl Serialize for MonthlySeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for (month, amount) in self.iter() {
            map.serialize_entry(&month.number().to_string(), &amount)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(n: u8) -> Month {
        Month::new(n).unwrap()
    }

    #[test]
    fn test_index_and_total() {
        let mut series = MonthlySeries::zero();
        series[month(3)] = Money::from_units(100);
        series[month(9)] = Money::from_units(50);

        assert_eq!(series.get(month(3)), Money::from_units(100));
        assert_eq!(series[month(1)], Money::zero());
        assert_eq!(series.total(), Money::from_units(150));
        assert_eq!(series.iter().count(), 12);
    }

    #[test]
    fn test_add_and_sub() {
        let a = MonthlySeries::uniform(Money::from_units(10));
        let b = MonthlySeries::uniform(Money::from_units(4));

        assert_eq!(a.add(&b), MonthlySeries::uniform(Money::from_units(14)));
        assert_eq!(b.sub(&a), MonthlySeries::uniform(Money::from_units(-6)));
        assert_eq!([a, b].iter().sum::<MonthlySeries>(), a.add(&b));
    }

    #[test]
    fn test_serializes_month_keys() {
        let series = MonthlySeries::uniform(Money::from_cents(150));
        let json = serde_json::to_value(series).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 12);
        assert!(json.get("1").is_some());
        assert!(json.get("12").is_some());
    }
}
