/// Builds a [`Getters`](crate::cursor::keyset::Getters) set from
/// `"column" => |row| value` pairs.
#[macro_export]
macro_rules! getters {
    ($($column:expr => $getter:expr),* $(,)?) => {{
        let getters = $crate::cursor::keyset::Getters::new();
        $(let getters = getters.with($column, $getter);)*
        getters
    }};
}
