use std::path::{Path, PathBuf};
use std::{env, fs, io};

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use toml::map::Entry;
use toml::{Table, Value};

/// Provides a layered builder for deserializing configuration files.
#[must_use]
pub struct Builder {
    table: Result<Table>,
}

impl Builder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            table: Ok(Table::new()),
        }
    }

    /// Adds a layer of configuration.
    ///
    /// Layers added later take precedence over earlier ones.
    pub fn add_layer<L: Layer>(mut self, source: L) -> Self {
        self.table = self.table.and_then(|mut t| {
            source.extend_table(&mut t)?;
            Ok(t)
        });
        self
    }

    /// Deserializes the configuration from the provided layers.
    pub fn build<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.table.and_then(deserialize_table)
    }
}

/// A configuration layer.
pub trait Layer {
    /// Extends a TOML table by this layer.
    fn extend_table(&self, table: &mut Table) -> Result<()>;
}

/// A TOML file configuration layer.
#[must_use]
pub struct File {
    path: PathBuf,
    required: bool,
}

impl File {
    /// Creates a new layer, loading TOML from the file at the given path.
    ///
    /// The file is required by default.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// Sets whether the file is required.
    ///
    /// If it is not required and does not exist, this layer is treated as
    /// empty.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A TOML text configuration layer.
#[must_use]
pub struct TomlText<'a> {
    text: &'a str,
}

impl<'a> TomlText<'a> {
    /// Creates a new layer, parsing the text as TOML.
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

/// An environment variable configuration layer.
///
/// Only variables starting with the prefix are loaded. The prefix is removed
/// and the rest of the name is lowercased. Nested values are separated by `__`
/// (two underscores), so with the prefix `BASENC_`, `BASENC_LOG__DEFAULT`
/// refers to `log.default`.
///
/// All values are treated as strings.
#[must_use]
pub struct Env {
    prefix: &'static str,
}

impl Env {
    /// Creates a new layer for variables starting with `prefix`.
    pub fn prefixed(prefix: &'static str) -> Self {
        Self { prefix }
    }

    fn extend_from<I, K, V>(&self, table: &mut Table, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(key) = key.as_ref().strip_prefix(self.prefix) else {
                continue;
            };

            if key.is_empty() {
                continue;
            }

            let key = key.to_ascii_lowercase();
            let segments = key.split("__").collect::<SmallVec<[&str; 4]>>();
            insert_at(table, &segments, Value::String(value.into()));
        }
    }
}

impl Layer for File {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        let file = match fs::read_to_string(&self.path) {
            Ok(content) => deserialize_str_to_table(&content)
                .with_context(|| format!("failed to load config {:?}", self.path))?,
            Err(why) => {
                if !self.required && why.kind() == io::ErrorKind::NotFound {
                    return Ok(());
                }

                return Err(why).context(format!("cannot read required config {:?}", self.path));
            },
        };

        merge_tables(table, file);
        Ok(())
    }
}

impl Layer for TomlText<'_> {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        let toml = deserialize_str_to_table(self.text).context("toml str literal invalid")?;
        merge_tables(table, toml);
        Ok(())
    }
}

impl Layer for Env {
    fn extend_table(&self, table: &mut Table) -> Result<()> {
        // keys that aren't utf8 can't carry the prefix. values get a lossy
        // conversion so a bad value still shows up in deserialization errors.
        let vars = env::vars_os().filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            let value = value
                .into_string()
                .unwrap_or_else(|o| o.to_string_lossy().into_owned());
            Some((key, value))
        });

        self.extend_from(table, vars);
        Ok(())
    }
}

fn deserialize_str_to_table(text: &str) -> Result<Table> {
    toml::from_str(text).context("config toml is invalid")
}

fn deserialize_table<T>(table: Table) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(table).context("cannot deserialize config")
}

fn merge_tables(target: &mut Table, consume: Table) {
    for (key, value) in consume {
        match target.entry(key) {
            Entry::Vacant(entry) => _ = entry.insert(value),
            Entry::Occupied(mut entry) => match (entry.get_mut(), value) {
                (Value::Table(a), Value::Table(b)) => merge_tables(a, b),
                (a, b) => *a = b,
            },
        }
    }
}

fn insert_at(table: &mut Table, path: &[&str], value: Value) {
    let [first, path @ ..] = path else {
        return;
    };

    match table.entry(*first) {
        Entry::Vacant(entry) => _ = entry.insert(nested_value(path, value)),
        Entry::Occupied(mut entry) => match entry.get_mut() {
            Value::Table(table) if !path.is_empty() => insert_at(table, path, value),
            entry => *entry = nested_value(path, value),
        },
    }
}

fn nested_value(path: &[&str], value: Value) -> Value {
    path.iter().rev().fold(value, |inner, &segment| {
        let mut table = Table::new();
        table.insert(segment.to_owned(), inner);
        Value::Table(table)
    })
}
