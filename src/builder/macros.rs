//! Macros for declaring state values and mode keys.

/// Declare a fieldless enum usable as a state value or a mode key.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`,
/// `Serialize` and `Deserialize`, and gets:
/// - `name()`: the variant name
/// - `ALL`: every variant in declaration order
/// - `next()`: the following variant, wrapping around after the last
///
/// # Example
///
/// ```
/// use statable::state_enum;
///
/// state_enum! {
///     pub enum Signal {
///         Green,
///         Yellow,
///         Red,
///     }
/// }
///
/// assert_eq!(Signal::Green.name(), "Green");
/// assert_eq!(Signal::ALL.len(), 3);
/// assert_eq!(Signal::Yellow.next(), Signal::Red);
/// assert_eq!(Signal::Red.next(), Signal::Green);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        #[allow(dead_code)]
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Variant name for display and logging.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            /// The next variant in declaration order, wrapping around.
            pub fn next(&self) -> Self {
                let position = Self::ALL
                    .iter()
                    .position(|variant| variant == self)
                    .unwrap_or(0);
                Self::ALL[(position + 1) % Self::ALL.len()]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    fn assert_state<S: State>(_: S) {}

    #[test]
    fn state_enum_macro_generates_helpers() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(
            TestState::ALL,
            &[TestState::Initial, TestState::Processing, TestState::Complete]
        );
        assert_state(TestState::Complete);
    }

    #[test]
    fn next_cycles_in_declaration_order() {
        assert_eq!(TestState::Initial.next(), TestState::Processing);
        assert_eq!(TestState::Processing.next(), TestState::Complete);
        assert_eq!(TestState::Complete.next(), TestState::Initial);
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_eq!(PublicState::A.next(), PublicState::B);
    }

    #[test]
    fn single_variant_cycles_to_itself() {
        state_enum! {
            enum Only {
                One,
            }
        }

        assert_eq!(Only::One.next(), Only::One);
    }

    #[test]
    fn state_enum_serializes() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestState::Processing);
    }

    #[deny(dead_code)]
    mod unused_helpers {
        state_enum! {
            pub(super) enum Quiet {
                Only,
            }
        }
    }

    #[test]
    fn unused_helpers_do_not_trip_dead_code() {
        assert_eq!(unused_helpers::Quiet::Only, unused_helpers::Quiet::Only);
    }
}
