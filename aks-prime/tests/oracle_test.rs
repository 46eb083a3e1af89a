use aks_prime::aks::{Verdict, decide};
use aks_prime::errors::AksError;
use aks_prime::scan::{ScanRange, par_scan};

fn trial_division(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

#[test]
fn matches_trial_division_up_to_500() -> Result<(), AksError> {
    let report = par_scan(ScanRange::try_new(2, 500)?)?;
    let expected: Vec<u64> = (2..=500).filter(|&n| trial_division(n)).collect();

    assert_eq!(report.primes, expected);
    assert_eq!(report.count(), 95);
    Ok(())
}

#[test]
fn composites_up_to_200_never_pass() -> Result<(), AksError> {
    for n in (0..=200).filter(|&n| !trial_division(n)) {
        assert_ne!(decide(n, &mut ())?, Verdict::Prime, "{n} is composite");
    }
    Ok(())
}
