//! Force-directed layout.
//!
//! Each tick applies, in order: link springs towards a rest length, gravity
//! towards the canvas centre, pairwise inverse-square charge, then
//! position-Verlet integration with friction. `alpha` scales every force and
//! cools geometrically; once it drops below [`ALPHA_MIN`] the layout is
//! considered settled and ticks become no-ops until [`Simulation::resume`].

use super::scale::CANVAS_WIDTH;

pub const ALPHA_START: f64 = 0.1;
pub const ALPHA_DECAY: f64 = 0.99;
pub const ALPHA_MIN: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParameters {
	pub width: f64,
	pub height: f64,
	/// Pull towards the centre of the bounding box.
	pub gravity: f64,
	/// Rest length of every link.
	pub link_distance: f64,
	pub link_strength: f64,
	/// Pairwise charge; negative values repel.
	pub charge: f64,
	/// Fraction of velocity kept between ticks.
	pub friction: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			width: CANVAS_WIDTH,
			height: CANVAS_WIDTH,
			gravity: 0.05,
			link_distance: 100.0,
			link_strength: 1.0,
			charge: -100.0,
			friction: 0.9,
		}
	}
}

impl SimulationParameters {
	pub fn with_size(self, width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..self
		}
	}
}

#[derive(Clone, Debug, Default)]
struct Body {
	x: f64,
	y: f64,
	// previous position; velocity is implied by x - px
	px: f64,
	py: f64,
	fixed: bool,
	// number of links touching the body
	weight: f64,
}

#[derive(Clone, Copy, Debug)]
struct Spring {
	source: usize,
	target: usize,
}

pub struct Simulation {
	pub parameters: SimulationParameters,
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	alpha: f64,
	rng: SeededRandom,
}

// Tiny random offset separating bodies that sit on the same point.
fn jiggle(rng: &mut SeededRandom) -> f64 {
	(rng.next_f64() - 0.5) * 1e-6
}

impl Simulation {
	/// Links referring to bodies out of range are dropped.
	pub fn new(
		parameters: SimulationParameters,
		positions: &[(f64, f64)],
		links: &[(usize, usize)],
	) -> Self {
		let mut bodies: Vec<Body> = positions
			.iter()
			.map(|&(x, y)| Body {
				x,
				y,
				px: x,
				py: y,
				..Default::default()
			})
			.collect();

		let mut springs = Vec::with_capacity(links.len());
		for &(source, target) in links {
			if source < bodies.len() && target < bodies.len() {
				bodies[source].weight += 1.0;
				bodies[target].weight += 1.0;
				springs.push(Spring { source, target });
			}
		}

		Self {
			parameters,
			bodies,
			springs,
			alpha: 0.0,
			rng: SeededRandom::new(1),
		}
	}

	pub fn with_rng(self, rng: SeededRandom) -> Self {
		Self { rng, ..self }
	}

	pub fn len(&self) -> usize {
		self.bodies.len()
	}

	pub fn is_running(&self) -> bool {
		self.alpha > 0.0
	}

	pub fn start(&mut self) {
		self.alpha = ALPHA_START;
	}

	/// Re-heat a cooled or cooling layout.
	pub fn resume(&mut self) {
		self.alpha = self.alpha.max(ALPHA_START);
	}

	pub fn position(&self, index: usize) -> Option<(f64, f64)> {
		self.bodies.get(index).map(|b| (b.x, b.y))
	}

	/// Hold a body at `(x, y)`; the other forces keep acting on its neighbours.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(body) = self.bodies.get_mut(index) {
			body.fixed = true;
			body.x = x;
			body.y = y;
			body.px = x;
			body.py = y;
		}
	}

	/// Hand a pinned body back to the simulation.
	pub fn release(&mut self, index: usize) {
		if let Some(body) = self.bodies.get_mut(index) {
			body.fixed = false;
		}
	}

	/// Advance one step. Returns `false` once the layout has cooled down.
	pub fn tick(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}
		self.alpha *= ALPHA_DECAY;
		if self.alpha < ALPHA_MIN {
			self.alpha = 0.0;
			return false;
		}

		self.apply_links();
		self.apply_gravity();
		self.apply_charge();
		self.integrate();
		true
	}

	fn apply_links(&mut self) {
		let (alpha, strength, distance) = (
			self.alpha,
			self.parameters.link_strength,
			self.parameters.link_distance,
		);
		for spring in &self.springs {
			let (s, t) = (&self.bodies[spring.source], &self.bodies[spring.target]);
			let (mut dx, mut dy) = (t.x - s.x, t.y - s.y);
			if dx == 0.0 && dy == 0.0 {
				dx = jiggle(&mut self.rng);
				dy = jiggle(&mut self.rng);
			}
			let len = (dx * dx + dy * dy).sqrt();
			let l = alpha * strength * (len - distance) / len;
			dx *= l;
			dy *= l;

			// heavier (better connected) bodies move less
			let total = s.weight + t.weight;
			let k = if total > 0.0 { s.weight / total } else { 0.5 };

			let target = &mut self.bodies[spring.target];
			target.x -= dx * k;
			target.y -= dy * k;
			let source = &mut self.bodies[spring.source];
			source.x += dx * (1.0 - k);
			source.y += dy * (1.0 - k);
		}
	}

	fn apply_gravity(&mut self) {
		let k = self.alpha * self.parameters.gravity;
		if k == 0.0 {
			return;
		}
		let (cx, cy) = (self.parameters.width / 2.0, self.parameters.height / 2.0);
		for body in self.bodies.iter_mut().filter(|b| !b.fixed) {
			body.x += (cx - body.x) * k;
			body.y += (cy - body.y) * k;
		}
	}

	// Direct O(n²) sum; networks here are a single hub with its kinases.
	fn apply_charge(&mut self) {
		let charge = self.alpha * self.parameters.charge;
		if charge == 0.0 {
			return;
		}
		let n = self.bodies.len();
		for i in 0..n {
			if self.bodies[i].fixed {
				continue;
			}
			let (x, y) = (self.bodies[i].x, self.bodies[i].y);
			let (mut shift_x, mut shift_y) = (0.0, 0.0);
			for (j, other) in self.bodies.iter().enumerate() {
				if i == j {
					continue;
				}
				let (mut dx, mut dy) = (other.x - x, other.y - y);
				if dx == 0.0 && dy == 0.0 {
					dx = jiggle(&mut self.rng);
					dy = jiggle(&mut self.rng);
				}
				// clamped so a jiggled pair does not blow apart
				let k = charge / (dx * dx + dy * dy).max(1.0);
				shift_x += dx * k;
				shift_y += dy * k;
			}
			// acts on the previous position, i.e. on velocity
			self.bodies[i].px -= shift_x;
			self.bodies[i].py -= shift_y;
		}
	}

	fn integrate(&mut self) {
		let friction = self.parameters.friction;
		for body in &mut self.bodies {
			if body.fixed {
				body.x = body.px;
				body.y = body.py;
			} else {
				let (vx, vy) = (body.px - body.x, body.py - body.y);
				body.px = body.x;
				body.py = body.y;
				body.x -= vx * friction;
				body.y -= vy * friction;
			}
		}
	}
}

/// Small deterministic generator for initial placement.
#[derive(Clone, Debug)]
pub struct SeededRandom {
	state: u32,
}

impl SeededRandom {
	pub fn new(seed: u32) -> Self {
		Self { state: seed }
	}

	/// Uniform in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
		(self.state >> 8) as f64 / (1u32 << 24) as f64
	}
}
