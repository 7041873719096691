//! Synthetic mixed-type datasets drawn from a Gaussian copula.

use log::debug;

use crate::config::GeneratorConfig;
use crate::correlation::{CorrelationMatrix, CorrelationSynthesizer};
use crate::error::Result;
use crate::marginal::MarginalTransformer;
use crate::rng::RandomSource;
use crate::schema::ColumnSchema;
use crate::types::DMatrix;

/// One synthetic dataset and the quantities it was generated from.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    /// True correlation of the latent Gaussian
    pub correlation: CorrelationMatrix,
    /// Latent `N(0, correlation)` draws, one observation per row
    pub latent: DMatrix,
    /// Latent draws after the marginal transforms
    pub ground_truth: DMatrix,
    /// Kind of each column of `ground_truth`
    pub schema: ColumnSchema,
}

/// Draws [`SyntheticDataset`]s.
///
/// Random draws happen in a fixed order (correlation, latent rows, binary
/// cutoffs), so a dataset is fully determined by the state of the
/// [`RandomSource`] it is given.
#[derive(Debug, Clone)]
pub struct CopulaDataGenerator {
    rows: usize,
    synthesizer: CorrelationSynthesizer,
    transformer: MarginalTransformer,
}

impl CopulaDataGenerator {
    /// Creates a generator, validating the configuration.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let transformer = MarginalTransformer::new(config)?;
        let synthesizer = CorrelationSynthesizer::new(config.dim())?;
        Ok(Self {
            rows: config.rows,
            synthesizer,
            transformer,
        })
    }

    /// Column schema of generated data.
    pub fn schema(&self) -> &ColumnSchema {
        self.transformer.schema()
    }

    /// Draws one dataset.
    pub fn generate(&self, rng: &mut RandomSource) -> Result<SyntheticDataset> {
        let correlation = self.synthesizer.sample(rng)?;
        let latent = rng.multivariate_normal(correlation.as_matrix(), self.rows)?;
        let ground_truth = self.transformer.apply(&latent, rng)?;
        debug!(
            "generated {}x{} dataset (seed {})",
            ground_truth.nrows(),
            ground_truth.ncols(),
            rng.seed()
        );
        Ok(SyntheticDataset {
            correlation,
            latent,
            ground_truth,
            schema: self.schema().clone(),
        })
    }
}
