/// Implements `Display`, `Serialize`, `Deserialize` and the case-insensitive
/// name lookup for an algorithm enum from a `"NAME" => value; pattern` table.
macro_rules! impl_serde_jwa {
    ($T:ty, [
        $($name:literal => $val:expr; $valp:pat,)*
    ]) => {
        impl core::fmt::Display for $T {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }

        #[allow(unused_qualifications)]
        impl<'de> serde::Deserialize<'de> for $T {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let name = <std::borrow::Cow<'_, str> as serde::Deserialize>::deserialize(deserializer)?;

                Self::from_name(&name).ok_or_else(|| {
                    <D::Error as serde::de::Error>::custom(format_args!("unknown algorithm `{name}`"))
                })
            }
        }

        #[allow(unused_qualifications)]
        impl serde::Serialize for $T {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                <&str as serde::Serialize>::serialize(&self.name(), serializer)
            }
        }

        impl $T {
            /// The canonical name of this algorithm, as written into the `alg`
            /// header.
            pub const fn name(&self) -> &'static str {
                match self {
                    $($valp => $name,)*
                }
            }

            /// Looks up an algorithm by name, ignoring ASCII case.
            pub(crate) fn from_name(name: &str) -> Option<Self> {
                $(
                    if name.eq_ignore_ascii_case($name) {
                        return Some($val);
                    }
                )*
                None
            }
        }
    };
}
