/// Counter increments, repeating with period three across the eight words.
pub const COUNTER_CONSTANTS: [u32; 8] = [
    0x4D34_D34D,
    0xD34D_34D3,
    0x34D3_4D34,
    0x4D34_D34D,
    0xD34D_34D3,
    0x34D3_4D34,
    0x4D34_D34D,
    0xD34D_34D3,
];

/// The eight state words, eight counter words and the counter carry bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CipherState {
    pub x: [u32; 8],
    pub c: [u32; 8],
    pub carry: bool,
}

/// `g(u, v) = ((u+v)² mod 2³²) ⊕ ((u+v)² >> 32)`.
fn next_state_function(x: u32, c: u32) -> u32 {
    let sum = u64::from(x.wrapping_add(c));
    let square = sum * sum;
    (square ^ (square >> 32)) as u32
}

impl CipherState {
    /// Interleaves the key words into the initial state and counter words.
    pub fn from_key_words(k: &[u16; 8]) -> Self {
        let word = |hi: usize, lo: usize| (u32::from(k[hi % 8]) << 16) | u32::from(k[lo % 8]);

        let x = std::array::from_fn(|j| {
            if j & 1 == 1 {
                word(j + 5, j + 4)
            } else {
                word(j + 1, j)
            }
        });
        let c = std::array::from_fn(|j| {
            if j & 1 == 1 {
                word(j, j + 1)
            } else {
                word(j + 4, j + 5)
            }
        });

        Self { x, c, carry: false }
    }

    /// One round: counter update with carry propagation, then the next-state function.
    pub fn advance(&mut self) {
        let mut carry = u64::from(self.carry);
        for (c, constant) in self.c.iter_mut().zip(COUNTER_CONSTANTS) {
            let t = u64::from(*c) + u64::from(constant) + carry;
            *c = t as u32;
            carry = t >> 32;
        }
        self.carry = carry != 0;

        let g: [u32; 8] = std::array::from_fn(|j| next_state_function(self.x[j], self.c[j]));

        for j in 0..8 {
            let prev = g[(j + 7) % 8];
            let prev2 = g[(j + 6) % 8];
            self.x[j] = if j & 1 == 0 {
                g[j]
                    .wrapping_add(prev.rotate_left(16))
                    .wrapping_add(prev2.rotate_left(16))
            } else {
                g[j].wrapping_add(prev.rotate_left(8)).wrapping_add(prev2)
            };
        }
    }

    /// Extracts a 128-bit block, lane 0 in the least significant 16 bits.
    pub fn derive(&self) -> u128 {
        let x = &self.x;
        let lo = |w: u32| w & 0xFFFF;
        let hi = |w: u32| w >> 16;

        let lanes = [
            lo(x[0]) ^ hi(x[5]),
            hi(x[0]) ^ lo(x[3]),
            lo(x[2]) ^ hi(x[7]),
            hi(x[2]) ^ lo(x[5]),
            lo(x[4]) ^ hi(x[1]),
            hi(x[4]) ^ lo(x[7]),
            lo(x[6]) ^ hi(x[3]),
            hi(x[6]) ^ lo(x[1]),
        ];

        lanes
            .iter()
            .enumerate()
            .fold(0u128, |block, (i, &lane)| block | (u128::from(lane) << (16 * i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_interleaving() {
        let k = [0x0000, 0x1111, 0x2222, 0x3333, 0x4444, 0x5555, 0x6666, 0x7777];
        let state = CipherState::from_key_words(&k);

        assert_eq!(state.x[0], 0x1111_0000);
        assert_eq!(state.x[1], 0x6666_5555);
        assert_eq!(state.c[0], 0x4444_5555);
        assert_eq!(state.c[1], 0x1111_2222);
        assert!(!state.carry);
    }

    #[test]
    fn test_counter_carry_wraps_into_next_round() {
        let mut state = CipherState {
            c: [u32::MAX; 8],
            ..CipherState::default()
        };
        state.advance();

        assert!(state.carry);
        assert_eq!(state.c[0], 0x4D34_D34C);
        // Every later word receives the carry from its predecessor.
        assert_eq!(state.c[1], 0xD34D_34D3);

        let before = state.c[0];
        state.advance();
        assert_eq!(state.c[0], before.wrapping_add(0x4D34_D34D).wrapping_add(1));
    }

    #[test]
    fn test_zero_state_derives_zero() {
        assert_eq!(CipherState::default().derive(), 0);
    }
}
