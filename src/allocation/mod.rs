//! Allocation engine
//!
//! Converts an amount charged at some [`Frequency`] into yearly and monthly
//! figures. Everything here is pure arithmetic over [`Money`]; the only
//! fallible step is [`validate_months`], which runs when an expense is
//! created or edited, before anything is persisted.
//!
//! Rounding happens wherever a division happens: the monthly equivalent and
//! each explicit-month share are rounded to the nearest hundredth. Any slack
//! between twelve rounded months and the yearly total is left as is.

mod series;

pub use series::MonthlySeries;

use crate::error::{BudgetError, BudgetResult, ScheduleError};
use crate::models::{Frequency, Money, Month, MonthSchedule};

/// Yearly total implied by charging `amount` at `frequency`
pub fn yearly_total(amount: Money, frequency: Frequency) -> Money {
    amount.times(frequency.occurrences_per_year())
}

/// The yearly total spread over twelve months, rounded
///
/// This is the single figure used wherever one number per record is needed
/// (dashboards, list views, income in the yearly overview).
pub fn monthly_equivalent(amount: Money, frequency: Frequency) -> Money {
    yearly_total(amount, frequency).round_div(12)
}

/// Distribute a record over the twelve months of a year
///
/// - Monthly: every month gets `amount` as is, whatever the schedule says.
/// - Spread: every month gets the monthly equivalent.
/// - Explicit: each listed month gets `amount / months.len()`, rounded;
///   every other month is zero.
///
/// The schedule is assumed to have passed [`validate_months`].
pub fn allocate(amount: Money, frequency: Frequency, schedule: &MonthSchedule) -> MonthlySeries {
    if frequency == Frequency::Monthly {
        return MonthlySeries::uniform(amount);
    }

    match schedule {
        MonthSchedule::Spread => MonthlySeries::uniform(monthly_equivalent(amount, frequency)),
        MonthSchedule::Explicit(months) if months.is_empty() => {
            MonthlySeries::uniform(monthly_equivalent(amount, frequency))
        }
        MonthSchedule::Explicit(months) => {
            let mut series = MonthlySeries::zero();
            let share = amount.round_div(months.len() as i64);
            for &month in months {
                series[month] = share;
            }
            series
        }
    }
}

/// Check a user-supplied month list against a frequency
///
/// Monthly frequencies ignore the list. An empty list means "spread". Any
/// value outside 1-12 fails with [`ScheduleError::InvalidMonth`]; otherwise
/// the number of distinct months must match the frequency's occurrence
/// count or it fails with [`ScheduleError::MonthCountMismatch`].
pub fn validate_months(months: &[i64], frequency: Frequency) -> Result<MonthSchedule, ScheduleError> {
    let Some(required) = frequency.required_months() else {
        return Ok(MonthSchedule::Spread);
    };
    if months.is_empty() {
        return Ok(MonthSchedule::Spread);
    }

    let mut parsed = Vec::with_capacity(months.len());
    for &value in months {
        let month = Month::from_i64(value).ok_or(ScheduleError::InvalidMonth(value))?;
        parsed.push(month);
    }

    let schedule = MonthSchedule::explicit(parsed);
    let given = schedule.months().len();
    if given != required {
        return Err(ScheduleError::MonthCountMismatch {
            frequency,
            required,
            given,
        });
    }

    Ok(schedule)
}

/// Parse a comma separated month list such as `"3,9"`
///
/// Blank input is an empty list. Range checks are left to
/// [`validate_months`].
pub fn parse_months(input: &str) -> BudgetResult<Vec<i64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                BudgetError::Validation(format!("Invalid month '{}': expected a number 1-12", part))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(n: u8) -> Month {
        Month::new(n).unwrap()
    }

    fn explicit(numbers: &[u8]) -> MonthSchedule {
        MonthSchedule::explicit(numbers.iter().map(|&n| month(n)))
    }

    #[test]
    fn test_yearly_total() {
        let amount = Money::from_units(1000);
        assert_eq!(yearly_total(amount, Frequency::Monthly), Money::from_units(12000));
        assert_eq!(yearly_total(amount, Frequency::Quarterly), Money::from_units(4000));
        assert_eq!(yearly_total(amount, Frequency::SemiAnnual), Money::from_units(2000));
        assert_eq!(yearly_total(amount, Frequency::Yearly), Money::from_units(1000));
    }

    #[test]
    fn test_monthly_equivalent() {
        assert_eq!(
            monthly_equivalent(Money::from_units(18000), Frequency::Yearly),
            Money::from_units(1500)
        );
        assert_eq!(
            monthly_equivalent(Money::from_units(3000), Frequency::Quarterly),
            Money::from_units(1000)
        );
        // 1000 / 12 = 83.333...
        assert_eq!(
            monthly_equivalent(Money::from_units(1000), Frequency::Yearly),
            Money::from_cents(8333)
        );
    }

    #[test]
    fn test_every_month_present_and_non_negative() {
        let cases = [
            (Frequency::Monthly, MonthSchedule::Spread),
            (Frequency::Quarterly, MonthSchedule::Spread),
            (Frequency::Quarterly, explicit(&[1, 4, 7, 10])),
            (Frequency::SemiAnnual, explicit(&[6, 12])),
            (Frequency::Yearly, explicit(&[2])),
        ];

        for (frequency, schedule) in cases {
            let series = allocate(Money::from_cents(99_999), frequency, &schedule);
            assert_eq!(series.iter().count(), 12);
            assert!(series.iter().all(|(_, amount)| !amount.is_negative()));
        }
    }

    #[test]
    fn test_monthly_amount_is_not_divided() {
        let amount = Money::from_cents(12_345);
        let series = allocate(amount, Frequency::Monthly, &MonthSchedule::Spread);
        assert!(series.iter().all(|(_, value)| value == amount));

        // A stray schedule on a monthly record is disregarded
        let series = allocate(amount, Frequency::Monthly, &explicit(&[1]));
        assert_eq!(series, MonthlySeries::uniform(amount));
    }

    #[test]
    fn test_spread_sums_to_yearly_total() {
        // yearly totals that split into whole hundredths
        for (cents, frequency) in [
            (300_000, Frequency::Quarterly),
            (600_000, Frequency::SemiAnnual),
            (1_800_000, Frequency::Yearly),
            (1_200, Frequency::Yearly),
        ] {
            let amount = Money::from_cents(cents);
            let series = allocate(amount, frequency, &MonthSchedule::Spread);

            let first = series.get(Month::JANUARY);
            assert!(series.iter().all(|(_, value)| value == first));

            let slack = (series.total() - yearly_total(amount, frequency)).abs();
            assert!(slack <= Money::from_cents(2), "{} {:?}", cents, frequency);
        }
    }

    #[test]
    fn test_spread_rounding_slack_is_bounded() {
        // each month is off by at most half a hundredth, so twelve months by at most six
        for frequency in [Frequency::Quarterly, Frequency::SemiAnnual, Frequency::Yearly] {
            for cents in [100_000, 99_999, 1_001, 7] {
                let amount = Money::from_cents(cents);
                let series = allocate(amount, frequency, &MonthSchedule::Spread);

                let first = series.get(Month::JANUARY);
                assert!(series.iter().all(|(_, value)| value == first));

                let slack = (series.total() - yearly_total(amount, frequency)).abs();
                assert!(slack <= Money::from_cents(6), "{} {:?}", cents, frequency);
            }
        }

        // quarterly 1000.00 -> 333.33 a month, 4 hundredths short over the year
        let series = allocate(Money::from_units(1000), Frequency::Quarterly, &MonthSchedule::Spread);
        assert_eq!(series.total(), Money::from_cents(399_996));
    }

    #[test]
    fn test_largest_valid_amount_allocates() {
        for frequency in [
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::SemiAnnual,
            Frequency::Yearly,
        ] {
            let series = allocate(Money::MAX, frequency, &MonthSchedule::Spread);
            assert_eq!(
                monthly_equivalent(Money::MAX, frequency),
                series.get(Month::JANUARY)
            );
        }
        assert_eq!(
            yearly_total(Money::MAX, Frequency::Monthly),
            Money::from_units(12_000_000_000_000)
        );
    }

    #[test]
    fn test_explicit_months_concentrate_the_charge() {
        let series = allocate(
            Money::from_units(6000),
            Frequency::SemiAnnual,
            &explicit(&[3, 9]),
        );

        assert_eq!(series[month(3)], Money::from_units(3000));
        assert_eq!(series[month(9)], Money::from_units(3000));
        for (m, value) in series.iter() {
            if m != month(3) && m != month(9) {
                assert_eq!(value, Money::zero());
            }
        }
    }

    #[test]
    fn test_explicit_single_month() {
        let series = allocate(Money::from_units(18000), Frequency::Yearly, &explicit(&[1]));
        assert_eq!(series[Month::JANUARY], Money::from_units(18000));
        assert_eq!(series.total(), Money::from_units(18000));
    }

    #[test]
    fn test_validate_rejects_wrong_count() {
        let err = validate_months(&[3], Frequency::SemiAnnual).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::MonthCountMismatch {
                frequency: Frequency::SemiAnnual,
                required: 2,
                given: 1,
            }
        );
        assert!(err.to_string().contains("exactly 2"));
    }

    #[test]
    fn test_validate_counts_distinct_months() {
        let err = validate_months(&[3, 3], Frequency::SemiAnnual).unwrap_err();
        assert!(matches!(err, ScheduleError::MonthCountMismatch { given: 1, .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert_eq!(
            validate_months(&[13], Frequency::Yearly),
            Err(ScheduleError::InvalidMonth(13))
        );
        assert_eq!(
            validate_months(&[0, 6], Frequency::SemiAnnual),
            Err(ScheduleError::InvalidMonth(0))
        );
    }

    #[test]
    fn test_validate_monthly_ignores_months() {
        assert_eq!(
            validate_months(&[1, 2, 40], Frequency::Monthly),
            Ok(MonthSchedule::Spread)
        );
    }

    #[test]
    fn test_validate_empty_means_spread() {
        assert_eq!(validate_months(&[], Frequency::Yearly), Ok(MonthSchedule::Spread));
    }

    #[test]
    fn test_validate_sorts_ascending() {
        let schedule = validate_months(&[10, 1, 7, 4], Frequency::Quarterly).unwrap();
        let numbers: Vec<u8> = schedule.months().iter().map(Month::number).collect();
        assert_eq!(numbers, vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_parse_months() {
        assert_eq!(parse_months("3, 9").unwrap(), vec![3, 9]);
        assert_eq!(parse_months("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_months("13").unwrap(), vec![13]);

        let err = parse_months("3,march").unwrap_err();
        assert!(err.is_validation());
    }
}
