//! Conversion of a loaded file onto the canonical columns.

use echem_ingest::Loader;
use echem_model::Schema;
use polars::prelude::DataFrame;
use serde_json::Value;

use crate::dimensions::{AliasPolicy, select_dimensions};
use crate::error::Result;
use crate::rename::RenameMap;

/// Output of a conversion: the canonical columns and their descriptors.
#[derive(Debug, Clone)]
pub struct Converted {
    /// Canonical columns in canonical order.
    pub table: DataFrame,
    /// One descriptor per table column, same order.
    pub schema: Schema,
}

/// Maps the columns of one device onto time, voltage and current.
///
/// A converter holds no state besides its configuration. Every accessor
/// reads the loader again and leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    name: &'static str,
    rename: RenameMap,
    policy: AliasPolicy,
}

impl Converter {
    /// Creates a converter keeping every alias that is present.
    pub const fn new(name: &'static str, rename: RenameMap) -> Self {
        Self {
            name,
            rename,
            policy: AliasPolicy::AllPresent,
        }
    }

    /// Sets the alias policy.
    pub const fn with_policy(mut self, policy: AliasPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the device name of this converter.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the rename map.
    pub fn rename_map(&self) -> &RenameMap {
        &self.rename
    }

    /// Returns the alias policy.
    pub fn policy(&self) -> AliasPolicy {
        self.policy
    }

    /// Returns the loader schema with descriptors renamed, before selection.
    ///
    /// # Errors
    ///
    /// Fails when the loader fails or when renaming makes two descriptors
    /// share a name.
    pub fn renamed_schema(&self, loader: &dyn Loader) -> Result<Schema> {
        let schema = loader.schema()?;
        let renamed = schema.renamed(|name| self.rename.get(name));
        renamed.ensure_unique_names()?;
        Ok(renamed)
    }

    /// Returns the canonical column names the converted table will have.
    pub fn column_names(&self, loader: &dyn Loader) -> Result<Vec<String>> {
        let renamed = self.renamed_schema(loader)?;
        select_dimensions(&renamed.field_names(), self.policy)
    }

    /// Returns the descriptors of the canonical columns.
    pub fn schema(&self, loader: &dyn Loader) -> Result<Schema> {
        let renamed = self.renamed_schema(loader)?;
        let names = select_dimensions(&renamed.field_names(), self.policy)?;
        Ok(renamed.project(&names))
    }

    /// Returns the canonical columns of the loader table.
    pub fn table(&self, loader: &dyn Loader) -> Result<DataFrame> {
        let names = self.column_names(loader)?;
        self.select_table(loader, &names)
    }

    /// Returns the metadata the loader was given.
    pub fn metadata(&self, loader: &dyn Loader) -> Value {
        loader.metadata()
    }

    /// Renames and selects the canonical columns.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MissingDimension`](crate::ConvertError) when
    /// time, voltage or current cannot be found after renaming, and any
    /// loader or schema error.
    pub fn convert(&self, loader: &dyn Loader) -> Result<Converted> {
        let renamed = self.renamed_schema(loader)?;
        let names = select_dimensions(&renamed.field_names(), self.policy)?;
        let schema = renamed.project(&names);
        let table = self.select_table(loader, &names)?;

        tracing::info!(
            converter = self.name,
            columns = ?names,
            rows = table.height(),
            "Converted table"
        );
        Ok(Converted { table, schema })
    }

    fn select_table(&self, loader: &dyn Loader, names: &[String]) -> Result<DataFrame> {
        let mut table = loader.table()?;
        let renamed: Vec<String> = table
            .get_column_names()
            .iter()
            .map(|name| self.rename.apply(name.as_str()).to_string())
            .collect();
        table.set_column_names(renamed.iter().map(String::as_str))?;
        Ok(table.select(names.iter().map(String::as_str))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use echem_ingest::{CsvLoader, LoaderOptions};

    const SWAP: RenameMap = RenameMap::new(&[("a", "t"), ("t", "a")]);
    const CLASH: RenameMap = RenameMap::new(&[("a", "t")]);

    #[test]
    fn test_rename_then_select() {
        let loader =
            CsvLoader::from_text("a,E,I,b\n0,1,2,3\n", LoaderOptions::new()).unwrap();
        let converter = Converter::new("test", CLASH);

        let converted = converter.convert(&loader).unwrap();
        assert_eq!(converted.schema.field_names(), vec!["t", "E", "I"]);
        let names: Vec<&str> = converted
            .table
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["t", "E", "I"]);
    }

    #[test]
    fn test_swapping_names_is_allowed() {
        let loader =
            CsvLoader::from_text("a,t,E,I\n0,1,2,3\n", LoaderOptions::new()).unwrap();
        let converted = Converter::new("swap", SWAP).convert(&loader).unwrap();

        let t = converted.table.column("t").unwrap().i64().unwrap();
        assert_eq!(t.get(0), Some(0));
    }

    #[test]
    fn test_rename_collision() {
        let loader =
            CsvLoader::from_text("a,t,E,I\n0,1,2,3\n", LoaderOptions::new()).unwrap();
        let err = Converter::new("clash", CLASH).convert(&loader).unwrap_err();
        assert!(matches!(err, ConvertError::Schema(_)));
    }

    #[test]
    fn test_loader_schema_is_untouched() {
        let loader = CsvLoader::from_text("a,E,I\n0,1,2\n", LoaderOptions::new()).unwrap();
        let converter = Converter::new("test", CLASH);

        let renamed = converter.renamed_schema(&loader).unwrap();
        assert_eq!(renamed.field_names(), vec!["t", "E", "I"]);
        assert_eq!(loader.schema().unwrap().field_names(), vec!["a", "E", "I"]);
    }

    #[test]
    fn test_first_match_policy() {
        let loader =
            CsvLoader::from_text("t,U,E,j,I\n0,1,2,3,4\n", LoaderOptions::new()).unwrap();
        let converter = Converter::new("test", RenameMap::EMPTY);
        assert_eq!(
            converter.column_names(&loader).unwrap(),
            vec!["t", "E", "U", "I", "j"]
        );

        let converter = converter.with_policy(AliasPolicy::FirstMatch);
        assert_eq!(converter.column_names(&loader).unwrap(), vec!["t", "E", "I"]);
        assert_eq!(converter.table(&loader).unwrap().width(), 3);
    }
}
