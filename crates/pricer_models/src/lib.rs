//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form option pricing and stochastic dynamics.
//!
//! This crate provides:
//! - Black-Scholes-Merton valuation of European calls (and puts by symmetry)
//!   with an optional continuous dividend yield
//! - Analytical call Greeks
//! - Standard normal CDF/PDF to double precision
//! - Geometric Brownian Motion dynamics (per-step log-increment moments)
//!
//! ## Design Principles
//!
//! - **Fail fast**: every input is validated eagerly; invalid inputs return an
//!   error instead of propagating NaN
//! - **Explicit opt-in** for the dividend yield (defaults to zero)
//! - **Pure functions**: no I/O, no shared state

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod models;
