/// Name of a frame column.
/// Examples: `target`, `text`, `label`
pub type ColumnName = String;
/// Raw categorical label value as it appears in the dataset.
/// Examples: `ham`, `spam`
pub type Label = String;
/// Dense integer class id assigned by the label encoder.
/// Examples: `0`, `1`
pub type ClassId = usize;
/// One normalized token produced by text normalization.
/// Examples: `win`, `buy`, `123`
pub type Token = String;
