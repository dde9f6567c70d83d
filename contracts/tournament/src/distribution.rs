//! Basis-point share calculator.
//!
//! Every position `i` in `1..=n` gets a weight from the distribution model and
//! `floor(available * weight_i / total_weight)` basis points. Position 1 takes
//! whatever the floors leave behind, so the shares of a full position range
//! always sum to exactly `available`.
//!
//! `Custom` shares are weights, not fixed basis points: when fewer positions
//! are paid than the list holds, the shares renormalize over the paid prefix.

use crate::errors::Error;
use crate::fixed_point;
use crate::types::Distribution;

pub const BASIS_POINTS: u32 = 10_000;
pub const MAX_POSITIONS: u32 = 1_000;
/// Largest exponent, in tenths, accepted for weighted models.
pub const MAX_DISTRIBUTION_WEIGHT: u32 = 50;

pub fn validate(distribution: &Distribution) -> Result<(), Error> {
    match distribution {
        Distribution::Linear(weight) | Distribution::Exponential(weight) => {
            if *weight > MAX_DISTRIBUTION_WEIGHT {
                return Err(Error::InvalidDistribution);
            }
        }
        Distribution::Uniform => {}
        Distribution::Custom(shares) => {
            if shares.is_empty() || shares.len() > MAX_POSITIONS {
                return Err(Error::InvalidDistribution);
            }
            for share in shares.iter() {
                if share == 0 || share > BASIS_POINTS {
                    return Err(Error::InvalidDistribution);
                }
            }
        }
    }
    Ok(())
}

pub fn validate_positions(positions: u32) -> Result<(), Error> {
    if positions == 0 || positions > MAX_POSITIONS {
        return Err(Error::InvalidPosition);
    }
    Ok(())
}

fn weight(distribution: &Distribution, position: u32, total_positions: u32) -> Result<i128, Error> {
    let rank_from_bottom = total_positions - position + 1;
    let weight = match distribution {
        Distribution::Linear(exponent) => fixed_point::int_pow_tenths(rank_from_bottom, *exponent),
        Distribution::Exponential(exponent) => {
            fixed_point::ratio(rank_from_bottom, total_positions)
                .and_then(|x| fixed_point::pow_tenths(x, *exponent))
        }
        Distribution::Uniform => Some(1),
        Distribution::Custom(shares) => Some(shares.get(position - 1).unwrap_or(0) as i128),
    };
    weight.ok_or(Error::ArithmeticOverflow)
}

fn floor_share(weight: i128, total_weight: i128, available_bp: u32) -> Result<u32, Error> {
    let scaled = weight
        .checked_mul(available_bp as i128)
        .ok_or(Error::ArithmeticOverflow)?;
    Ok((scaled / total_weight) as u32)
}

/// Share of `available_bp` for a 1-indexed `position` out of `total_positions`.
pub fn share(
    distribution: &Distribution,
    position: u32,
    total_positions: u32,
    available_bp: u32,
) -> Result<u32, Error> {
    if position == 0 || position > total_positions {
        return Ok(0);
    }
    if total_positions > MAX_POSITIONS {
        return Err(Error::InvalidPosition);
    }

    let mut total_weight: i128 = 0;
    for i in 1..=total_positions {
        total_weight = total_weight
            .checked_add(weight(distribution, i, total_positions)?)
            .ok_or(Error::ArithmeticOverflow)?;
    }
    if total_weight == 0 {
        return Err(Error::InvalidDistribution);
    }

    if position > 1 {
        return floor_share(
            weight(distribution, position, total_positions)?,
            total_weight,
            available_bp,
        );
    }

    let mut others: u32 = 0;
    for i in 2..=total_positions {
        others += floor_share(weight(distribution, i, total_positions)?, total_weight, available_bp)?;
    }
    Ok(available_bp - others)
}

/// `amount * bp / BASIS_POINTS`, rounded down.
pub fn apply_bp(amount: i128, bp: u32) -> Result<i128, Error> {
    amount
        .checked_mul(bp as i128)
        .map(|v| v / BASIS_POINTS as i128)
        .ok_or(Error::ArithmeticOverflow)
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{vec, Env};

    fn all_shares(distribution: &Distribution, n: u32, available: u32) -> [u32; 16] {
        let mut out = [0u32; 16];
        for i in 1..=n {
            out[(i - 1) as usize] = share(distribution, i, n, available).unwrap();
        }
        out
    }

    fn sum(shares: &[u32]) -> u32 {
        shares.iter().sum()
    }

    #[test]
    fn test_linear_weight_one() {
        let shares = all_shares(&Distribution::Linear(10), 3, BASIS_POINTS);
        assert_eq!(&shares[..3], &[5001, 3333, 1666]);
        assert_eq!(sum(&shares), BASIS_POINTS);
    }

    #[test]
    fn test_uniform() {
        let shares = all_shares(&Distribution::Uniform, 4, BASIS_POINTS);
        assert_eq!(&shares[..4], &[2500, 2500, 2500, 2500]);

        // remainder goes to the first position
        let shares = all_shares(&Distribution::Uniform, 3, BASIS_POINTS);
        assert_eq!(&shares[..3], &[3334, 3333, 3333]);
    }

    #[test]
    fn test_exponential_matches_linear_ratios() {
        let shares = all_shares(&Distribution::Exponential(10), 3, BASIS_POINTS);
        assert_eq!(&shares[..3], &[5001, 3333, 1666]);
    }

    #[test]
    fn test_fractional_weight() {
        // 2^1.5 : 1 = 2.828 : 1
        let first = share(&Distribution::Linear(15), 1, 2, BASIS_POINTS).unwrap();
        let second = share(&Distribution::Linear(15), 2, 2, BASIS_POINTS).unwrap();
        assert!((2_611..=2_613).contains(&second));
        assert_eq!(first + second, BASIS_POINTS);
    }

    #[test]
    fn test_conservation_across_models() {
        let env = Env::default();
        let models = [
            Distribution::Linear(0),
            Distribution::Linear(10),
            Distribution::Linear(25),
            Distribution::Linear(50),
            Distribution::Exponential(5),
            Distribution::Exponential(37),
            Distribution::Uniform,
            Distribution::Custom(vec![&env, 5_000, 3_000, 2_000]),
        ];
        for model in models.iter() {
            for n in 1..=16u32 {
                for available in [BASIS_POINTS, 9_000, 7_777, 1] {
                    let shares = all_shares(model, n, available);
                    assert_eq!(sum(&shares), available);
                }
            }
        }
    }

    #[test]
    fn test_shares_are_non_increasing() {
        for model in [Distribution::Linear(20), Distribution::Exponential(15)].iter() {
            let shares = all_shares(model, 10, BASIS_POINTS);
            for i in 1..10 {
                assert!(shares[i - 1] >= shares[i]);
            }
        }
    }

    #[test]
    fn test_custom_shares() {
        let env = Env::default();
        let custom = Distribution::Custom(vec![&env, 6_000, 3_000, 1_000]);
        let shares = all_shares(&custom, 3, 8_000);
        assert_eq!(&shares[..3], &[4_800, 2_400, 800]);

        // positions past the list get nothing
        let shares = all_shares(&custom, 5, BASIS_POINTS);
        assert_eq!(&shares[..5], &[6_000, 3_000, 1_000, 0, 0]);

        // fewer positions than shares renormalizes over the prefix
        let shares = all_shares(&custom, 2, 9_000);
        assert_eq!(&shares[..2], &[6_000, 3_000]);
    }

    #[test]
    fn test_out_of_range_positions() {
        assert_eq!(share(&Distribution::Uniform, 0, 3, BASIS_POINTS), Ok(0));
        assert_eq!(share(&Distribution::Uniform, 4, 3, BASIS_POINTS), Ok(0));
        assert_eq!(share(&Distribution::Uniform, 1, 0, BASIS_POINTS), Ok(0));
    }

    #[test]
    fn test_largest_supported_range() {
        let first = share(&Distribution::Linear(MAX_DISTRIBUTION_WEIGHT), 1, MAX_POSITIONS, BASIS_POINTS);
        assert!(first.is_ok());
        assert_eq!(
            share(&Distribution::Uniform, 1, MAX_POSITIONS + 1, BASIS_POINTS),
            Err(Error::InvalidPosition)
        );
    }

    #[test]
    fn test_validate() {
        let env = Env::default();
        assert_eq!(validate(&Distribution::Linear(50)), Ok(()));
        assert_eq!(validate(&Distribution::Linear(51)), Err(Error::InvalidDistribution));
        assert_eq!(validate(&Distribution::Exponential(99)), Err(Error::InvalidDistribution));
        assert_eq!(validate(&Distribution::Custom(vec![&env])), Err(Error::InvalidDistribution));
        assert_eq!(
            validate(&Distribution::Custom(vec![&env, 5_000, 0])),
            Err(Error::InvalidDistribution)
        );
        assert_eq!(validate(&Distribution::Custom(vec![&env, 7_000, 3_000])), Ok(()));
    }

    #[test]
    fn test_apply_bp() {
        assert_eq!(apply_bp(500, 1_000), Ok(50));
        assert_eq!(apply_bp(999, 3_333), Ok(332));
        assert_eq!(apply_bp(i128::MAX, 2), Err(Error::ArithmeticOverflow));
    }
}
