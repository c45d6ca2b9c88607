/// Raw joystick reads by driver index
///
/// Implementations are refreshed by the caller once per poll cycle; the
/// adapter only reads. Out-of-range values are passed through untouched.
pub trait RawInputSource {
    /// Identifier the device was opened with
    fn id(&self) -> usize;

    /// Button state by raw index
    fn button(&self, index: usize) -> bool;

    /// Axis value in `[-1, 1]` by raw index
    fn axis(&self, index: usize) -> f32;

    /// Hat position `(x, y)`, each in `{-1, 0, 1}`, with `y = 1` meaning up
    fn hat(&self, index: usize) -> (i8, i8);
}

impl<S: RawInputSource + ?Sized> RawInputSource for &S {
    fn id(&self) -> usize {
        (**self).id()
    }

    fn button(&self, index: usize) -> bool {
        (**self).button(index)
    }

    fn axis(&self, index: usize) -> f32 {
        (**self).axis(index)
    }

    fn hat(&self, index: usize) -> (i8, i8) {
        (**self).hat(index)
    }
}

/// In-memory source for tests: every value is set by hand
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct MockSource {
    pub id: usize,
    pub buttons: std::collections::HashMap<usize, bool>,
    pub axes: std::collections::HashMap<usize, f32>,
    pub hats: std::collections::HashMap<usize, (i8, i8)>,
}

#[cfg(test)]
impl MockSource {
    pub fn with_id(id: usize) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn set_button(&mut self, index: usize, pressed: bool) {
        self.buttons.insert(index, pressed);
    }

    pub fn set_axis(&mut self, index: usize, value: f32) {
        self.axes.insert(index, value);
    }

    pub fn set_hat(&mut self, index: usize, value: (i8, i8)) {
        self.hats.insert(index, value);
    }
}

#[cfg(test)]
impl RawInputSource for MockSource {
    fn id(&self) -> usize {
        self.id
    }

    fn button(&self, index: usize) -> bool {
        self.buttons.get(&index).copied().unwrap_or(false)
    }

    fn axis(&self, index: usize) -> f32 {
        self.axes.get(&index).copied().unwrap_or(0.0)
    }

    fn hat(&self, index: usize) -> (i8, i8) {
        self.hats.get(&index).copied().unwrap_or((0, 0))
    }
}
