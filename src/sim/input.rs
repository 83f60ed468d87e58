/// Input state: the tri-state press protocol.
///
/// The host samples its devices once per tick into a `TickInput` (two
/// axes and a button — how keys map to them is the host's business).
/// The control state machine then needs to tell a *tap* from a *hold*
/// within the one-tick model, so each of the five controls carries a
/// tri-state flag:
///
///   0   idle (not pressed)
///  −1   freshly pressed, not yet consumed
///  +1   pressed and consumed
///
/// A handler that acts on a fresh press writes +1; anything still at −1
/// after control runs is marked consumed wholesale. A held key therefore
/// fires exactly once, on the tick it went down.
///
/// Forward/backward are face-relative: `face_jstk` flips the X axis and
/// swaps the two flags while the player faces right, and is its own
/// inverse.

/// One tick of sampled input: −1/0/+1 per axis, plus the button.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickInput {
    pub jstk_x: i8,
    pub jstk_y: i8,
    pub btn: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub jstk_x: i8,
    pub jstk_y: i8,
    pub btn: bool,
    /// Fresh-press flags: forward, backward, up, down, button.
    pub clr_f: i8,
    pub clr_b: i8,
    pub clr_u: i8,
    pub clr_d: i8,
    pub clr_btn: i8,
}

impl InputState {
    pub fn new() -> InputState {
        InputState::default()
    }

    /// Take the host's sample for this tick.
    pub fn read(&mut self, inp: TickInput) {
        self.jstk_x = inp.jstk_x;
        self.jstk_y = inp.jstk_y;
        self.btn = inp.btn;
    }

    /// Update the tri-states from the raw sample. Unfaced convention:
    /// forward is screen-left (the facing-left canonical orientation).
    pub fn clr_jstk(&mut self) {
        step_flag(&mut self.clr_f, self.jstk_x < 0);
        step_flag(&mut self.clr_b, self.jstk_x > 0);
        step_flag(&mut self.clr_u, self.jstk_y < 0);
        step_flag(&mut self.clr_d, self.jstk_y > 0);
        step_flag(&mut self.clr_btn, self.btn);
    }

    /// Mark every remaining fresh press consumed. Runs after player
    /// control so a held key cannot re-fire next tick.
    pub fn clr_all(&mut self) {
        for flag in [
            &mut self.clr_f,
            &mut self.clr_b,
            &mut self.clr_u,
            &mut self.clr_d,
            &mut self.clr_btn,
        ] {
            if *flag == -1 {
                *flag = 1;
            }
        }
    }

    /// Re-orient for a character facing `face`. Self-inverse.
    pub fn face_jstk(&mut self, face: i16) {
        if face > 0 {
            self.jstk_x = -self.jstk_x;
            std::mem::swap(&mut self.clr_f, &mut self.clr_b);
        }
    }

    pub fn unface_jstk(&mut self, face: i16) {
        self.face_jstk(face);
    }

    /// After `face_jstk`, forward-held is always jstk_x == −1.
    pub fn forward_held(&self) -> bool {
        self.jstk_x < 0
    }

    pub fn backward_held(&self) -> bool {
        self.jstk_x > 0
    }

    pub fn up_held(&self) -> bool {
        self.jstk_y < 0
    }

    pub fn down_held(&self) -> bool {
        self.jstk_y > 0
    }
}

fn step_flag(flag: &mut i8, active: bool) {
    if !active {
        *flag = 0;
    } else if *flag == 0 {
        *flag = -1;
    }
}

/// Consume a fresh press: true exactly when the flag was −1.
pub fn take_fresh(flag: &mut i8) -> bool {
    if *flag == -1 {
        *flag = 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held_left() -> TickInput {
        TickInput { jstk_x: -1, jstk_y: 0, btn: false }
    }

    #[test]
    fn hold_fires_fresh_exactly_once() {
        let mut st = InputState::new();

        st.read(held_left());
        st.clr_jstk();
        assert_eq!(st.clr_f, -1);
        st.clr_all();

        // still held next tick: consumed, not fresh again
        st.read(held_left());
        st.clr_jstk();
        assert_eq!(st.clr_f, 1);

        // released, then pressed again: fresh again
        st.read(TickInput::default());
        st.clr_jstk();
        assert_eq!(st.clr_f, 0);
        st.read(held_left());
        st.clr_jstk();
        assert_eq!(st.clr_f, -1);
    }

    #[test]
    fn take_fresh_consumes() {
        let mut st = InputState::new();
        st.read(held_left());
        st.clr_jstk();
        assert!(take_fresh(&mut st.clr_f));
        assert!(!take_fresh(&mut st.clr_f));
        assert_eq!(st.clr_f, 1);
    }

    #[test]
    fn face_jstk_is_its_own_inverse() {
        let mut st = InputState::new();
        st.read(TickInput { jstk_x: 1, jstk_y: 0, btn: true });
        st.clr_jstk();
        let before = st;

        st.face_jstk(1);
        // facing right: a held-right key reads as forward
        assert!(st.forward_held());
        assert_eq!(st.clr_f, -1);

        st.unface_jstk(1);
        assert_eq!(st.jstk_x, before.jstk_x);
        assert_eq!(st.clr_f, before.clr_f);
        assert_eq!(st.clr_b, before.clr_b);
    }

    #[test]
    fn facing_left_is_the_identity() {
        let mut st = InputState::new();
        st.read(held_left());
        st.clr_jstk();
        let before = st;
        st.face_jstk(-1);
        assert_eq!(st.jstk_x, before.jstk_x);
        assert_eq!(st.clr_f, before.clr_f);
    }

    #[test]
    fn button_tristate() {
        let mut st = InputState::new();
        st.read(TickInput { jstk_x: 0, jstk_y: 0, btn: true });
        st.clr_jstk();
        assert_eq!(st.clr_btn, -1);
        st.clr_all();
        st.read(TickInput { jstk_x: 0, jstk_y: 0, btn: true });
        st.clr_jstk();
        assert_eq!(st.clr_btn, 1);
    }
}
