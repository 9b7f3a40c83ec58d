/// Xorshift32 generator owned by a running game.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    pub fn next_int(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        self.next() % max
    }

    /// Inclusive on both ends.
    pub fn next_range_u32(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(max >= min);
        match (max - min).checked_add(1) {
            Some(span) => min + self.next_int(span),
            None => self.next(),
        }
    }

    /// Uniform in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        // 24 bits fit the f32 mantissa exactly.
        (self.next() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[min, max)`.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_unit()
    }
}
