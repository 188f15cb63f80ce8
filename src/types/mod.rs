// Two explicit schema trees: the legacy document is only ever deserialized
// (TOML) and the current document is only ever serialized (YAML). The
// mapping between them lives in tools::upgrade.

pub mod dest;
pub mod source;

pub(crate) fn is_zero(v: &i64) -> bool {
    *v == 0
}

pub(crate) fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

pub(crate) fn is_false(v: &bool) -> bool {
    !*v
}
