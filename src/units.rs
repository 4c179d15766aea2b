/// Logical maze width, counted in rooms.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
/// Logical maze height, counted in rooms.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Number of grid cells along the x axis (`2 * Width + 1` for a generated maze).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);
/// Number of grid cells along the y axis, which maps to world z (`2 * Height + 1` for a generated maze).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);

impl Width {
    #[inline]
    pub fn as_columns(self) -> ColumnsCount {
        ColumnsCount(2 * self.0 + 1)
    }
}

impl Height {
    #[inline]
    pub fn as_rows(self) -> RowsCount {
        RowsCount(2 * self.0 + 1)
    }
}
