use crate::error::Result;
use crate::types::{GroundTruthPolicy, Scope};

/// Configuration for turning reconciled findings into keyed labels
///
/// `dbt_only` restricts the label to what DBT observed. With `mri_excluded`
/// also set, records where MRI is more suspicious than DBT are dropped
/// instead of being labelled from DBT alone.
///
/// # Example
///
/// ```
/// use truthmap_core::{AggregationOptions, GroundTruthPolicy, Scope};
///
/// let options = AggregationOptions::default()
///     .with_policy(GroundTruthPolicy::Acr4Plus)
///     .with_scope(Scope::BreastWise)
///     .mri_excluded(false);
///
/// assert!(options.dbt_only);
/// assert!(!options.mri_excluded);
/// assert_eq!(options.scope, Scope::BreastWise);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Ground-truth definition
    pub policy: GroundTruthPolicy,

    /// Aggregation key granularity
    pub scope: Scope,

    /// Only DBT-observed findings define the label
    pub dbt_only: bool,

    /// Discard records where MRI outranks DBT (only meaningful with `dbt_only`)
    pub mri_excluded: bool,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            policy: GroundTruthPolicy::Biopsy,
            scope: Scope::VolumeWise,
            dbt_only: true,
            mri_excluded: true,
        }
    }
}

impl AggregationOptions {
    /// Builds options from their textual configuration values
    ///
    /// Fails with `UnsupportedPolicy` or `UnsupportedScope` before any record
    /// is processed.
    ///
    /// # Example
    ///
    /// ```
    /// use truthmap_core::{AggregationOptions, GroundTruthPolicy, TruthError};
    ///
    /// let options = AggregationOptions::parse("acr4+", "patient-wise", false, false).unwrap();
    /// assert_eq!(options.policy, GroundTruthPolicy::Acr4Plus);
    ///
    /// let err = AggregationOptions::parse("biopsy", "lesion-wise", true, true).unwrap_err();
    /// assert!(matches!(err, TruthError::UnsupportedScope(_)));
    /// ```
    pub fn parse(gt_type: &str, scope: &str, dbt_only: bool, mri_excluded: bool) -> Result<Self> {
        Ok(Self {
            policy: gt_type.parse()?,
            scope: scope.parse()?,
            dbt_only,
            mri_excluded,
        })
    }

    /// Builder: Set ground-truth policy
    pub fn with_policy(mut self, policy: GroundTruthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder: Set aggregation scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Builder: Restrict labels to DBT findings
    pub fn dbt_only(mut self, dbt_only: bool) -> Self {
        self.dbt_only = dbt_only;
        self
    }

    /// Builder: Discard records where MRI outranks DBT
    pub fn mri_excluded(mut self, excluded: bool) -> Self {
        self.mri_excluded = excluded;
        self
    }
}
