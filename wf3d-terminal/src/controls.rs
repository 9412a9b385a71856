//! Key bindings that turn held keys into rotation increments

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use nom::{
    character::complete::{anychar, char, one_of},
    combinator::{all_consuming, map},
    number::complete::double,
    sequence::{separated_pair, tuple},
    IResult,
};
use thiserror::Error;
use wf3d_core::{Axis, ShapeState};

/// Degrees per frame for a held rotation key
pub const DEFAULT_STEP: f64 = 5.0;

/// A single key mapped to a signed rotation around one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBinding {
    pub key: char,
    pub axis: Axis,
    pub degrees: f64,
}

impl KeyBinding {
    pub fn new(key: char, axis: Axis, degrees: f64) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            axis,
            degrees,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}{:+}",
            self.key,
            self.axis.to_string().to_ascii_lowercase(),
            self.degrees
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindingError {
    #[error("invalid key binding `{0}`: expected KEY=AXIS[+-]DEGREES, e.g. q=x-5")]
    Malformed(String),
    #[error("invalid key binding `{0}`: rotation must be a finite number of degrees")]
    NonFinite(String),
}

fn parse_axis(input: &str) -> IResult<&str, Axis> {
    map(one_of("xyzXYZ"), |c| match c.to_ascii_lowercase() {
        'x' => Axis::X,
        'y' => Axis::Y,
        _ => Axis::Z,
    })(input)
}

fn parse_binding(input: &str) -> IResult<&str, KeyBinding> {
    map(
        separated_pair(anychar, char('='), tuple((parse_axis, double))),
        |(key, (axis, degrees))| KeyBinding::new(key, axis, degrees),
    )(input)
}

impl FromStr for KeyBinding {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (_, binding) = all_consuming(parse_binding)(text)
            .map_err(|_| BindingError::Malformed(text.to_string()))?;
        if binding.key.is_whitespace() {
            return Err(BindingError::Malformed(text.to_string()));
        }
        if !binding.degrees.is_finite() {
            return Err(BindingError::NonFinite(text.to_string()));
        }
        Ok(binding)
    }
}

/// Ordered table of key bindings
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    bindings: Vec<KeyBinding>,
}

impl Controls {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// Two opposite bindings per axis: `q,w` for X, `a,s` for Y, `z,x` for Z.
    /// The first key of each pair turns by `-step`, the second by `+step`.
    pub fn default_with_step(step: f64) -> Self {
        Self::new(vec![
            KeyBinding::new('q', Axis::X, -step),
            KeyBinding::new('w', Axis::X, step),
            KeyBinding::new('a', Axis::Y, -step),
            KeyBinding::new('s', Axis::Y, step),
            KeyBinding::new('z', Axis::Z, -step),
            KeyBinding::new('x', Axis::Z, step),
        ])
    }

    /// Replace the binding for an already bound key, or append a new one
    pub fn bind(&mut self, binding: KeyBinding) {
        match self.bindings.iter_mut().find(|b| b.key == binding.key) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = KeyBinding>) -> Self {
        for binding in overrides {
            self.bind(binding);
        }
        self
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Rotate `shape` once for every binding whose key is held.
    ///
    /// Returns how many bindings fired.
    pub fn apply(&self, held: &HashSet<char>, shape: &mut ShapeState) -> usize {
        let mut fired = 0;
        for binding in &self.bindings {
            if held.contains(&binding.key) {
                shape.rotate(binding.axis, binding.degrees);
                fired += 1;
            }
        }
        fired
    }

    /// Title line listing the keys bound to each axis
    pub fn caption(&self) -> String {
        let groups: Vec<String> = Axis::ALL
            .into_iter()
            .filter_map(|axis| {
                let keys: Vec<String> = self
                    .bindings
                    .iter()
                    .filter(|b| b.axis == axis)
                    .map(|b| b.key.to_string())
                    .collect();
                (!keys.is_empty()).then(|| format!("{} : {}", keys.join(","), axis))
            })
            .collect();

        format!("Control -   {}", groups.join("    "))
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::default_with_step(DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf3d_core::Wireframe;

    fn held(keys: &str) -> HashSet<char> {
        keys.chars().collect()
    }

    #[test]
    fn test_default_caption() {
        assert_eq!(
            Controls::default().caption(),
            "Control -   q,w : X    a,s : Y    z,x : Z"
        );
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(
            "q=x-5".parse::<KeyBinding>(),
            Ok(KeyBinding::new('q', Axis::X, -5.0))
        );
        assert_eq!(
            " E=Z+2.5 ".parse::<KeyBinding>(),
            Ok(KeyBinding::new('e', Axis::Z, 2.5))
        );
        assert_eq!(
            "k=y10".parse::<KeyBinding>(),
            Ok(KeyBinding::new('k', Axis::Y, 10.0))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "q", "q=", "q=w5", "q=x", "qq=x5", "q=x5deg", "q:x5", " =x5"] {
            assert!(
                matches!(text.parse::<KeyBinding>(), Err(BindingError::Malformed(_))),
                "`{text}` should not parse"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        let binding = KeyBinding::new('e', Axis::Z, -2.5);
        assert_eq!(binding.to_string(), "e=z-2.5");
        assert_eq!(binding.to_string().parse::<KeyBinding>(), Ok(binding));
    }

    #[test]
    fn test_overrides_replace_then_append() {
        let controls = Controls::default().with_overrides([
            KeyBinding::new('q', Axis::X, -1.0),
            KeyBinding::new('e', Axis::Z, 3.0),
        ]);
        assert_eq!(controls.bindings().len(), 7);
        assert_eq!(controls.bindings()[0], KeyBinding::new('q', Axis::X, -1.0));
        assert_eq!(controls.bindings()[6], KeyBinding::new('e', Axis::Z, 3.0));
    }

    #[test]
    fn test_apply_held_keys_in_same_frame() {
        let controls = Controls::default();
        let mut shape = ShapeState::from_wireframe(Wireframe::cube(0.2));

        assert_eq!(controls.apply(&held("qs"), &mut shape), 2);
        assert_eq!(shape.rotation().angles(), [-5.0, 5.0, 0.0]);

        // Opposite keys on one axis cancel out
        assert_eq!(controls.apply(&held("zx"), &mut shape), 2);
        assert_eq!(shape.rotation().angles(), [-5.0, 5.0, 0.0]);

        assert_eq!(controls.apply(&held("p"), &mut shape), 0);
        assert_eq!(controls.apply(&held("www"), &mut shape), 1);
        assert_eq!(shape.rotation().angles(), [0.0, 5.0, 0.0]);
    }

    #[test]
    fn test_custom_step() {
        let controls = Controls::default_with_step(2.5);
        let mut shape = ShapeState::from_wireframe(Wireframe::cube(0.2));
        controls.apply(&held("x"), &mut shape);
        controls.apply(&held("x"), &mut shape);
        assert_eq!(shape.rotation().angles(), [0.0, 0.0, 5.0]);
    }
}
