//! # Domain Types
//!
//! Small value types shared by the catalog and the sale engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   SaleStatus    │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Processing     │   │  Electronics    │       │
//! │  │  1600 = 16%     │   │  Completed      │   │  Clothing       │       │
//! │  └─────────────────┘   │  Cancelled      │   │  Home ... Other │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::parse_decimal;
use crate::validation::validate_tax_rate_bps;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1600 bps = 16% (IVA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Parses a percentage such as `"16"` or `"8.25"`.
    ///
    /// ## Example
    /// ```rust
    /// use dreams_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_percentage_str("8.25").unwrap().bps(), 825);
    /// assert!(TaxRate::from_percentage_str("-1").is_err());
    /// ```
    pub fn from_percentage_str(s: &str) -> Result<Self, ValidationError> {
        let bps = parse_decimal(s.trim().trim_end_matches('%'), "tax rate", 2)?;
        Self::checked(bps)
    }

    /// Parses a fraction such as `"0.16"`.
    pub fn from_decimal_str(s: &str) -> Result<Self, ValidationError> {
        let bps = parse_decimal(s, "tax rate", 4)?;
        Self::checked(bps)
    }

    fn checked(bps: i64) -> Result<Self, ValidationError> {
        let bps = u32::try_from(bps).map_err(|_| ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        })?;
        validate_tax_rate_bps(bps)?;
        Ok(TaxRate(bps))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Displays as a percentage, e.g. `16%` or `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::DEFAULT_TAX_RATE
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The lifecycle state of a sale.
///
/// ```text
/// PROCESSING ──finalize()──► COMPLETED
///     │
///     └────────cancel()────► CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Lines are being added; stock is reserved.
    Processing,
    /// Sale was finalized.
    Completed,
    /// Sale was cancelled and its stock returned.
    Cancelled,
}

impl SaleStatus {
    /// All states, in lifecycle order.
    pub const ALL: [SaleStatus; 3] = [
        SaleStatus::Processing,
        SaleStatus::Completed,
        SaleStatus::Cancelled,
    ];

    /// True for states that admit no further mutation.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, SaleStatus::Completed | SaleStatus::Cancelled)
    }
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Processing
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleStatus::Processing => write!(f, "processing"),
            SaleStatus::Completed => write!(f, "completed"),
            SaleStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for SaleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "processing" | "open" => Ok(SaleStatus::Processing),
            "completed" | "complete" => Ok(SaleStatus::Completed),
            "cancelled" | "canceled" => Ok(SaleStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown sale status '{}'", other),
            )),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// Catalog category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Sports,
    Beauty,
    Books,
    Toys,
    Food,
    Automotive,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Sports,
        Category::Beauty,
        Category::Books,
        Category::Toys,
        Category::Food,
        Category::Automotive,
        Category::Other,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Home => "Home",
            Category::Sports => "Sports",
            Category::Beauty => "Beauty",
            Category::Books => "Books",
            Category::Toys => "Toys",
            Category::Food => "Food",
            Category::Automotive => "Automotive",
            Category::Other => "Other",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronic and technology products",
            Category::Clothing => "Garments and accessories",
            Category::Home => "Home goods and decoration",
            Category::Sports => "Sporting and recreational goods",
            Category::Beauty => "Beauty and personal care",
            Category::Books => "Books and educational material",
            Category::Toys => "Toys and children's products",
            Category::Food => "Food products",
            Category::Automotive => "Automotive products and accessories",
            Category::Other => "Unclassified products",
        }
    }

    /// Lenient lookup by display name, case-insensitive. Unknown input maps to `Other`.
    pub fn parse(input: &str) -> Category {
        let needle = input.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .unwrap_or(Category::Other)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
