// Owned collection of particles for one surface size. A resize builds a new
// store; nothing is carried over.

use crate::color::PALETTE_SIZE;
use crate::particle::Particle;
use rand::Rng;

pub struct ParticleStore {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
}

impl ParticleStore {
    // Scatter `count` particles uniformly over a `width` x `height` surface.
    // Draw order per particle is fixed so a seeded generator reproduces the
    // same store.
    pub fn initialize<R: Rng>(width: f32, height: f32, count: usize, rng: &mut R) -> ParticleStore {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let pos_x = rng.gen::<f32>() * width;
            let pos_y = rng.gen::<f32>() * height;
            let vel_x = rng.gen_range(-1.0, 1.0);
            let vel_y = rng.gen_range(-1.0, 1.0);
            let disperse_x = rng.gen_range(-4.0, 4.0);
            let disperse_y = rng.gen_range(-4.0, 4.0);
            let return_speed = rng.gen_range(0.02, 0.05);
            let size = rng.gen_range(2.0, 6.0);
            let opacity = rng.gen_range(0.4, 1.0);
            let color_index = rng.gen_range(0, PALETTE_SIZE as u8);

            let mut p = Particle::new([pos_x, pos_y], [vel_x, vel_y], size, opacity, color_index);
            p.disperse_vel = [disperse_x, disperse_y];
            p.return_speed = return_speed;
            particles.push(p);
        }

        ParticleStore {
            width,
            height,
            particles,
        }
    }

    pub fn from_particles(width: f32, height: f32, particles: Vec<Particle>) -> ParticleStore {
        ParticleStore {
            width,
            height,
            particles,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn dispersed_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_dispersed()).count()
    }

    // New palette slot for every particle; motion and state are left alone
    pub fn resample_colors<R: Rng>(&mut self, rng: &mut R) {
        for p in &mut self.particles {
            p.color_index = rng.gen_range(0, PALETTE_SIZE as u8);
        }
    }
}
