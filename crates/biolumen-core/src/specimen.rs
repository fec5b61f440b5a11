use crate::config::{Color, Configuration};
use crate::field::{FieldKey, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The active configuration together with the particle field built from it.
///
/// Replacing the configuration swaps both in one step; the field is
/// resampled only when its [`FieldKey`] changes. `generation` increments on
/// every resample so renderers know when to re-upload particle buffers.
pub struct Specimen {
    config: Configuration,
    key: FieldKey,
    field: ParticleField,
    generation: u64,
    rng: StdRng,
}

impl Specimen {
    pub fn new(config: Configuration, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = ParticleField::generate(config.particle_count, &mut rng);
        Self {
            key: FieldKey::of(&config),
            config,
            field,
            generation: 0,
            rng,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install `config`; returns whether the particle field was rebuilt.
    pub fn replace(&mut self, config: Configuration) -> bool {
        let key = FieldKey::of(&config);
        let regenerate = key != self.key;
        if regenerate {
            self.field = ParticleField::generate(config.particle_count, &mut self.rng);
            self.key = key;
            self.generation += 1;
            log::info!(
                "[field] '{}' regenerated {} particles (generation {})",
                config.name,
                self.field.len(),
                self.generation
            );
        }
        self.config = config;
        regenerate
    }

    pub fn set_color(&mut self, color: Color) {
        self.config.color = color;
    }
}
