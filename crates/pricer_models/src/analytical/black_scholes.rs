//! Black-Scholes-Merton pricing model for European options.
//!
//! This module provides closed-form valuation of European calls (and puts
//! by symmetry) under lognormal dynamics with a constant risk-free rate,
//! constant volatility, and an optional continuous dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! For T ≤ 0 the option has expired and is worth its intrinsic value.
//! That branch is taken before d₁/d₂ are formed.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

/// Intrinsic value of a call: `max(spot - strike, 0)`.
#[inline]
pub fn call_intrinsic(spot: f64, strike: f64) -> f64 {
    (spot - strike).max(0.0)
}

/// Intrinsic value of a put: `max(strike - spot, 0)`.
#[inline]
pub fn put_intrinsic(spot: f64, strike: f64) -> f64 {
    (strike - spot).max(0.0)
}

/// Prices a European call with the Black-Scholes-Merton formula.
///
/// Convenience wrapper over [`BlackScholes::price_call`] taking every
/// input explicitly. Pass `0.0` as `dividend_yield` for the plain
/// Black-Scholes call.
///
/// # Errors
/// Any [`AnalyticalError`] input-validation variant; see [`BlackScholes::price_call`].
///
/// # Examples
/// ```
/// use pricer_models::analytical::price_call;
///
/// let price = price_call(100.0, 100.0, 1.0, 0.05, 0.2, 0.0).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
///
/// // Expired and out of the money
/// assert_eq!(price_call(100.0, 120.0, 0.0, 0.05, 0.2, 0.0).unwrap(), 0.0);
/// ```
pub fn price_call(
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
) -> Result<f64, AnalyticalError> {
    BlackScholes::new(rate, volatility)?
        .with_dividend_yield(dividend_yield)?
        .price_call(spot, strike, time_to_maturity)
}

/// Black-Scholes-Merton model for European option pricing.
///
/// Holds the market parameters shared by every valuation: risk-free rate,
/// volatility, and continuous dividend yield (zero unless opted into with
/// [`with_dividend_yield`](Self::with_dividend_yield)). Spot, strike, and
/// time to maturity are supplied per query.
///
/// Zero volatility is accepted at construction: such a model can still
/// value expired options, but any query with time remaining fails with
/// `InvalidVolatility`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 100.0, 1.0).unwrap();
/// let put = bs.price_put(100.0, 100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholes {
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
    /// Continuous dividend yield (q)
    dividend_yield: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model with zero dividend yield.
    ///
    /// # Arguments
    /// * `rate` - Risk-free interest rate (annualised, may be negative)
    /// * `volatility` - Volatility (annualised, must be non-negative)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility is negative or not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-0.01, 0.0).is_ok());
    /// assert!(BlackScholes::new(0.05, -0.2).is_err());
    /// assert!(BlackScholes::new(f64::NAN, 0.2).is_err());
    /// ```
    pub fn new(rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate { rate });
        }

        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        Ok(Self {
            rate,
            volatility,
            dividend_yield: 0.0,
        })
    }

    /// Opts into a continuous dividend yield (carrying-cost adjustment).
    ///
    /// # Errors
    /// `AnalyticalError::InvalidDividendYield` if the yield is negative or not finite.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Result<Self, AnalyticalError> {
        if !(dividend_yield.is_finite() && dividend_yield >= 0.0) {
            return Err(AnalyticalError::InvalidDividendYield { dividend_yield });
        }
        self.dividend_yield = dividend_yield;
        Ok(self)
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Validates a per-query input triple.
    ///
    /// Returns `true` when the query has time remaining (T > 0) and the
    /// closed form applies, `false` when it is expired.
    fn validate_query(&self, spot: f64, strike: f64, expiry: f64) -> Result<bool, AnalyticalError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !(strike.is_finite() && strike > 0.0) {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if !expiry.is_finite() {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }

        let live = expiry > 0.0;
        if live && self.volatility <= 0.0 {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        Ok(live)
    }

    /// d₁ and d₂ for a validated, live query.
    #[inline]
    fn d1_d2_unchecked(&self, spot: f64, strike: f64, expiry: f64) -> (f64, f64) {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let carry = self.rate - self.dividend_yield + 0.5 * self.volatility * self.volatility;

        let d1 = ((spot / strike).ln() + carry * expiry) / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }

    /// Computes the d1 term of the Black-Scholes-Merton formula.
    ///
    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// # Errors
    /// Input validation errors, and `InvalidExpiry` when `expiry <= 0`
    /// (d₁ is undefined once the option has expired).
    pub fn d1(&self, spot: f64, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        if !self.validate_query(spot, strike, expiry)? {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }
        Ok(self.d1_d2_unchecked(spot, strike, expiry).0)
    }

    /// Computes the d2 term of the Black-Scholes-Merton formula.
    ///
    /// d₂ = d₁ - σ√T
    ///
    /// # Errors
    /// Same as [`d1`](Self::d1).
    pub fn d2(&self, spot: f64, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        if !self.validate_query(spot, strike, expiry)? {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }
        Ok(self.d1_d2_unchecked(spot, strike, expiry).1)
    }

    /// Computes the European call option price.
    ///
    /// C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Arguments
    /// * `spot` - Spot price (S), finite and positive
    /// * `strike` - Strike price (K), finite and positive
    /// * `expiry` - Time to maturity in years (T); `T <= 0` returns intrinsic value
    ///
    /// # Returns
    /// The fair value, in `[0, S]`.
    ///
    /// # Errors
    /// - `InvalidSpot` / `InvalidStrike` for non-positive or non-finite prices
    /// - `InvalidExpiry` for non-finite T
    /// - `InvalidVolatility` when T > 0 and σ = 0
    /// - `NumericalInstability` if the formula produced a non-finite value
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(0.05, 0.2).unwrap();
    ///
    /// // At expiry the option is worth max(S - K, 0)
    /// assert_eq!(bs.price_call(110.0, 100.0, 0.0).unwrap(), 10.0);
    ///
    /// // Zero volatility with time remaining is a contract violation
    /// let flat = BlackScholes::new(0.05, 0.0).unwrap();
    /// assert!(flat.price_call(100.0, 100.0, 1.0).is_err());
    /// ```
    pub fn price_call(&self, spot: f64, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        if !self.validate_query(spot, strike, expiry)? {
            return Ok(call_intrinsic(spot, strike));
        }

        let (d1, d2) = self.d1_d2_unchecked(spot, strike, expiry);
        let carry_discount = (-self.dividend_yield * expiry).exp();
        let discount = (-self.rate * expiry).exp();

        let price = spot * carry_discount * norm_cdf(d1) - strike * discount * norm_cdf(d2);
        finite_non_negative(price, "call price")
    }

    /// Computes the European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
    ///
    /// # Errors
    /// Same as [`price_call`](Self::price_call).
    pub fn price_put(&self, spot: f64, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        if !self.validate_query(spot, strike, expiry)? {
            return Ok(put_intrinsic(spot, strike));
        }

        let (d1, d2) = self.d1_d2_unchecked(spot, strike, expiry);
        let carry_discount = (-self.dividend_yield * expiry).exp();
        let discount = (-self.rate * expiry).exp();

        let price = strike * discount * norm_cdf(-d2) - spot * carry_discount * norm_cdf(-d1);
        finite_non_negative(price, "put price")
    }

    /// Computes the analytical Greeks of a European call.
    ///
    /// At or past expiry, delta is the step function of moneyness
    /// (1 when S > K, else 0) and every other sensitivity is zero.
    ///
    /// # Errors
    /// Same as [`price_call`](Self::price_call).
    pub fn call_greeks(&self, spot: f64, strike: f64, expiry: f64) -> Result<Greeks, AnalyticalError> {
        if !self.validate_query(spot, strike, expiry)? {
            return Ok(Greeks {
                delta: if spot > strike { 1.0 } else { 0.0 },
                ..Greeks::default()
            });
        }

        let (d1, d2) = self.d1_d2_unchecked(spot, strike, expiry);
        let sqrt_t = expiry.sqrt();
        let carry_discount = (-self.dividend_yield * expiry).exp();
        let discount = (-self.rate * expiry).exp();
        let n_d1 = norm_cdf(d1);
        let n_d2 = norm_cdf(d2);
        let pdf_d1 = norm_pdf(d1);

        let greeks = Greeks {
            delta: carry_discount * n_d1,
            gamma: carry_discount * pdf_d1 / (spot * self.volatility * sqrt_t),
            vega: spot * carry_discount * pdf_d1 * sqrt_t,
            theta: -(spot * carry_discount * pdf_d1 * self.volatility) / (2.0 * sqrt_t)
                - self.rate * strike * discount * n_d2
                + self.dividend_yield * spot * carry_discount * n_d1,
            rho: strike * expiry * discount * n_d2,
        };

        if greeks.is_finite() {
            Ok(greeks)
        } else {
            Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite Greeks at S={}, K={}, T={}", spot, strike, expiry),
            })
        }
    }
}

/// Floors tiny negative rounding residue at zero; rejects NaN/inf.
#[inline]
fn finite_non_negative(value: f64, what: &str) -> Result<f64, AnalyticalError> {
    if value.is_finite() {
        Ok(value.max(0.0))
    } else {
        Err(AnalyticalError::NumericalInstability {
            message: format!("{} evaluated to {}", what, value),
        })
    }
}

/// Analytical sensitivities of an option price.
///
/// Theta is the derivative with respect to calendar time (per year), so it
/// is usually negative for a long call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Returns `true` when every sensitivity is finite.
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.vega.is_finite()
            && self.theta.is_finite()
            && self.rho.is_finite()
    }
}

/// A European call contract priced under Black-Scholes-Merton.
///
/// The strike and market parameters are fixed once; the contract is then
/// re-priced at any spot and remaining maturity along a path.
///
/// # Examples
/// ```
/// use pricer_models::analytical::OptionContract;
///
/// let contract = OptionContract::new(105.0, 0.03, 0.2).unwrap();
/// let quote = contract.quote(100.0, 0.5).unwrap();
/// assert_eq!(quote.spot, 100.0);
/// assert!(quote.fair_value > 0.0);
///
/// // The dividend yield is an explicit opt-in
/// let with_carry = contract.with_dividend_yield(0.02).unwrap();
/// assert!(with_carry.price_call(100.0, 0.5).unwrap() < quote.fair_value);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    strike: f64,
    model: BlackScholes,
}

impl OptionContract {
    /// Creates a call contract with zero dividend yield.
    ///
    /// # Errors
    /// - `InvalidStrike` if strike is not finite and positive
    /// - `InvalidRate` / `InvalidVolatility` from [`BlackScholes::new`]
    pub fn new(strike: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        Self::from_model(strike, BlackScholes::new(rate, volatility)?)
    }

    /// Creates a call contract over an existing model.
    ///
    /// # Errors
    /// `InvalidStrike` if strike is not finite and positive.
    pub fn from_model(strike: f64, model: BlackScholes) -> Result<Self, AnalyticalError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        Ok(Self { strike, model })
    }

    /// Returns a copy of the contract with the given dividend yield.
    ///
    /// # Errors
    /// `InvalidDividendYield` if the yield is negative or not finite.
    pub fn with_dividend_yield(self, dividend_yield: f64) -> Result<Self, AnalyticalError> {
        Ok(Self {
            model: self.model.with_dividend_yield(dividend_yield)?,
            ..self
        })
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.model.rate()
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.model.volatility()
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.model.dividend_yield()
    }

    /// Returns the underlying pricing model.
    #[inline]
    pub fn model(&self) -> &BlackScholes {
        &self.model
    }

    /// Intrinsic value at `spot`: `max(spot - strike, 0)`.
    #[inline]
    pub fn intrinsic_value(&self, spot: f64) -> f64 {
        call_intrinsic(spot, self.strike)
    }

    /// Fair value of the call at `spot` with `time_to_maturity` remaining.
    pub fn price_call(&self, spot: f64, time_to_maturity: f64) -> Result<f64, AnalyticalError> {
        self.model.price_call(spot, self.strike, time_to_maturity)
    }

    /// Call Greeks at `spot` with `time_to_maturity` remaining.
    pub fn greeks(&self, spot: f64, time_to_maturity: f64) -> Result<Greeks, AnalyticalError> {
        self.model.call_greeks(spot, self.strike, time_to_maturity)
    }

    /// Prices the call and packages the result as a [`PricingQuote`].
    ///
    /// A negative time to maturity is reported as `0.0` in the quote.
    pub fn quote(&self, spot: f64, time_to_maturity: f64) -> Result<PricingQuote, AnalyticalError> {
        let fair_value = self.price_call(spot, time_to_maturity)?;
        Ok(PricingQuote {
            spot,
            time_to_maturity: time_to_maturity.max(0.0),
            fair_value,
        })
    }
}

/// Result of a single pricing evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingQuote {
    /// Spot price used for the evaluation
    pub spot: f64,
    /// Remaining time to maturity in years (>= 0)
    pub time_to_maturity: f64,
    /// Fair value (>= 0)
    pub fair_value: f64,
}

impl PricingQuote {
    /// Returns `true` when the quote was taken at or after expiry.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.time_to_maturity <= 0.0
    }
}
