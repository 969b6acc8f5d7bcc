//! Rain and snow particle channel control.

use crate::model::Precipitation;

/// The two particle effect channels the host exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleEffect {
    Rain,
    Snow,
}

/// Host service that starts and stops particle playback.
///
/// `play` on an already-playing channel and `stop` on an idle one must be
/// harmless; the update routine leans on that.
pub trait ParticleSink {
    fn play(&mut self, effect: ParticleEffect);
    fn stop(&mut self, effect: ParticleEffect);
}

/// Drive the particle channels from the current precipitation.
///
/// Both channels are stopped first, then at most one is started, so the
/// routine is idempotent and at most one effect is ever active.
pub fn update_particles(sink: &mut dyn ParticleSink, precipitation: Precipitation) {
    sink.stop(ParticleEffect::Rain);
    sink.stop(ParticleEffect::Snow);
    match precipitation {
        Precipitation::Rain => sink.play(ParticleEffect::Rain),
        Precipitation::Snow => sink.play(ParticleEffect::Snow),
        Precipitation::None => {}
    }
}
