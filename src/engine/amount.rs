use std::fmt;

/// Running total of transaction amounts.
/// Adding floats one after the other accumulates a rounding error on every step,
/// so the exact sum is kept instead as a list of non-overlapping partials
/// (Shewchuk's algorithm) and only rounded once when the value is read.
/// Partials are ordered by increasing magnitude.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountTotal {
    partials: Vec<f64>,
    // Plain IEEE sum, only read once the exact one left the f64 range
    naive: f64,
}

impl AmountTotal {
    pub fn new() -> Self {
        AmountTotal {
            partials: Vec::new(),
            naive: 0.0,
        }
    }

    pub fn add(&mut self, amount: f64) {
        self.naive += amount;
        if !self.naive.is_finite() {
            return;
        }

        let mut x = amount;
        let mut i = 0;
        for j in 0..self.partials.len() {
            let mut y = self.partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                self.partials[i] = lo;
                i += 1;
            }
            x = hi;
        }
        self.partials.truncate(i);
        self.partials.push(x);
    }

    /// The exact sum rounded to the nearest f64.
    pub fn value(&self) -> f64 {
        if !self.naive.is_finite() {
            return self.naive;
        }

        let mut n = self.partials.len();
        if n == 0 {
            return 0.0;
        }

        n -= 1;
        let mut hi = self.partials[n];
        let mut lo = 0.0;
        while n > 0 {
            let x = hi;
            n -= 1;
            let y = self.partials[n];
            hi = x + y;
            lo = y - (hi - x);
            if lo != 0.0 {
                break;
            }
        }

        // Half-way case: the remaining partials decide the rounding direction
        if n > 0 {
            let next = self.partials[n - 1];
            if (lo < 0.0 && next < 0.0) || (lo > 0.0 && next > 0.0) {
                let y = lo * 2.0;
                let x = hi + y;
                if y == x - hi {
                    hi = x;
                }
            }
        }

        hi
    }
}

impl FromIterator<f64> for AmountTotal {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut total = AmountTotal::new();
        for amount in iter {
            total.add(amount);
        }
        total
    }
}

impl fmt::Display for AmountTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::AmountTotal;

    #[test]
    fn test_that_empty_total_is_zero() {
        let total = AmountTotal::new();
        assert_eq!(total.value(), 0.0);
        assert_eq!(total.to_string(), "0.0000");
    }

    #[test]
    fn test_that_two_decimal_amounts_sum_exactly() {
        let total: AmountTotal = [430.2, 150.2, 97.66].into_iter().collect();
        assert_eq!(total.value(), 678.06);
        assert_eq!(total.to_string(), "678.0600");

        let total: AmountTotal = [
            430.2, 150.2, 67.8, 985.0, 97.66, 33.22, 666.0, 154.15, 215.17, 89.77,
        ]
        .into_iter()
        .collect();
        assert_eq!(total.value(), 2889.17);
    }

    #[test]
    fn test_that_sub_ten_thousandth_amounts_are_kept() {
        let total: AmountTotal = [0.00001, 0.00004].into_iter().collect();
        assert_eq!(total.value(), 0.00005);
    }

    #[test]
    fn test_that_small_amounts_are_not_absorbed_by_large_ones() {
        let total: AmountTotal = [1e16, 1.0, 1.0, -1e16].into_iter().collect();
        assert_eq!(total.value(), 2.0);

        let total: AmountTotal = [10.0, 1e15].into_iter().collect();
        assert_eq!(total.value(), 1_000_000_000_000_010.0);
    }

    #[test]
    fn test_that_negative_amounts_are_summed() {
        let mut total = AmountTotal::new();
        total.add(-200.12);
        total.add(100.0023);
        assert_eq!(total.value(), -100.1177);
        assert_eq!(total.to_string(), "-100.1177");
    }

    #[test]
    fn test_that_overflowing_total_is_infinite() {
        let total: AmountTotal = [f64::MAX, f64::MAX].into_iter().collect();
        assert_eq!(total.value(), f64::INFINITY);
    }
}
