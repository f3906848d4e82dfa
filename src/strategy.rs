use crate::instance::CharacterId;
use crate::state::{Color, State};

/** The strategy callback (§4.7): a caller-supplied, stateless ordering of
the characters to try at a decision-tree level. The engine restricts
whatever order is returned to the current component and moves the
max-red-black-degree character to the front (§4.5, §4.8).

Implementors must be deterministic (§4.7: "must be deterministic for
reproducibility") and may return characters outside the current
component or that are dead — the engine filters those out.
*/
pub trait Strategy: std::fmt::Debug {
    /// Candidate characters to try at this level, in preference order.
    fn order(&self, state: &State) -> Vec<CharacterId>;
}

/// The reference strategy: all currently alive characters, `Red` ones
/// first, then `Black`, ascending index within each color.
#[derive(Debug, Default, Clone, Copy)]
pub struct Alphabetic;

impl Strategy for Alphabetic {
    fn order(&self, state: &State) -> Vec<CharacterId> {
        let alive = |c: &&CharacterId| state.character_alive[**c];
        let m = state.instance.m_orig;
        let mut reds: Vec<CharacterId> = (0..m).filter(|c| alive(&c)).filter(|&c| state.color[c] == Color::Red).collect();
        let mut blacks: Vec<CharacterId> = (0..m).filter(|c| alive(&c)).filter(|&c| state.color[c] == Color::Black).collect();
        reds.sort_unstable();
        blacks.sort_unstable();
        reds.append(&mut blacks);
        reds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::MatrixLoader;
    use std::rc::Rc;

    #[test]
    fn red_characters_precede_black_ones() {
        let inst = Rc::new(
            MatrixLoader::new("1 3\n1 1 1\n")
                .read_next()
                .unwrap()
                .unwrap(),
        );
        let mut state = State::initial(inst);
        state.color[1] = Color::Red;
        let order = Alphabetic.order(&state);
        assert_eq!(order, vec![1, 0, 2]);
    }
}
