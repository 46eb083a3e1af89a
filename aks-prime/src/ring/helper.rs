use num_integer::Roots;

/// Computes the greatest common divisor of two numbers.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

/// Checks whether two numbers share no common factor other than 1.
pub fn is_coprime(a: u64, b: u64) -> bool {
    gcd(a, b) == 1
}

/// Euler's totient: the count of `i` in `[1, n]` coprime to `n`.
///
/// Brute force, O(n). Only ever called on the small AKS parameter `r`.
///
/// # Example
///
/// ```
/// # use aks_prime::ring::euler_phi;
/// assert_eq!(euler_phi(12), 4);
/// assert_eq!(euler_phi(0), 0);
/// ```
pub fn euler_phi(n: u64) -> u64 {
    (1..=n).filter(|&i| is_coprime(n, i)).count() as u64
}

/// Checks whether `n = m^k` for integers `m` and `k >= 2`.
///
/// Every exponent `p` in `2..=ceil(log2 n)` is tried with an exact integer
/// `p`-th root, so the answer does not depend on floating point rounding.
/// Numbers below 4 are never perfect powers.
///
/// # Example
///
/// ```
/// # use aks_prime::ring::is_perfect_power;
/// assert!(is_perfect_power(125));
/// assert!(is_perfect_power(1 << 40));
/// assert!(!is_perfect_power(97));
/// ```
pub fn is_perfect_power(n: u64) -> bool {
    if n < 4 {
        return false;
    }

    (2..=ceil_log2(n)).any(|p| n.nth_root(p).checked_pow(p) == Some(n))
}

/// `ceil(log2 n)` for `n >= 2`.
fn ceil_log2(n: u64) -> u32 {
    u64::BITS - (n - 1).leading_zeros()
}
