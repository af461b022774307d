use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};
use tracing::debug;

use crate::config::shell_config::{ConfigCreationError, InvalidSeedEntrySnafu, SeedNotMapSnafu};
use crate::tree::{NodeId, Tree, TreeError};

/// Initial layout of a session tree. Entries keep the order they had in
/// the config file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Seed {
    entries: Vec<SeedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedEntry {
    Folder {
        name: String,
        children: Vec<SeedEntry>,
    },
    File {
        name: String,
    },
}

impl Seed {
    /// A mapping describes a folder, a null value a file. An empty `seed:`
    /// key yields an empty seed.
    pub fn from_yaml(value: &Yaml) -> Result<Self, ConfigCreationError> {
        let entries = match value {
            Yaml::Value(Scalar::Null) => Vec::new(),
            Yaml::Mapping(mapping) => Self::parse_entries(mapping)?,
            _ => return SeedNotMapSnafu.fail(),
        };
        Ok(Seed { entries })
    }

    fn parse_entries(
        mapping: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<SeedEntry>, ConfigCreationError> {
        mapping
            .iter()
            .map(|(key, value)| {
                let name = match key {
                    Yaml::Value(Scalar::String(name)) => name.to_string(),
                    // Numeric keys like `2024:` still make sensible names
                    Yaml::Value(Scalar::Integer(number)) => number.to_string(),
                    other => {
                        return InvalidSeedEntrySnafu {
                            name: format!("{other:?}"),
                        }
                        .fail();
                    }
                };
                match value {
                    Yaml::Mapping(children) => Ok(SeedEntry::Folder {
                        children: Self::parse_entries(children)?,
                        name,
                    }),
                    Yaml::Value(Scalar::Null) => Ok(SeedEntry::File { name }),
                    _ => InvalidSeedEntrySnafu { name }.fail(),
                }
            })
            .collect()
    }

    pub fn entries(&self) -> &[SeedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates every entry below the root of `tree`.
    pub fn apply(&self, tree: &mut Tree) -> Result<(), TreeError> {
        let root = tree.root();
        Self::apply_entries(&self.entries, tree, root)?;
        debug!("Seeded tree with {} nodes", tree.len() - 1);
        Ok(())
    }

    fn apply_entries(
        entries: &[SeedEntry],
        tree: &mut Tree,
        folder: NodeId,
    ) -> Result<(), TreeError> {
        for entry in entries {
            match entry {
                SeedEntry::Folder { name, children } => {
                    let created = tree.insert_folder(folder, name)?;
                    Self::apply_entries(children, tree, created)?;
                }
                SeedEntry::File { name } => {
                    tree.insert_file(folder, name)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use saphyr::LoadableYamlNode;

    fn seed_from(yaml: &str) -> Result<Seed, ConfigCreationError> {
        let documents = Yaml::load_from_str(yaml).unwrap();
        Seed::from_yaml(&documents[0])
    }

    #[test]
    fn nested_layout_keeps_file_order() {
        let seed = seed_from(
            r#"
zeta: {}
alpha:
  b.txt: ~
  a.txt:
"#,
        )
        .unwrap();

        let mut tree = Tree::new();
        seed.apply(&mut tree).unwrap();

        let children = tree.children(tree.root()).unwrap();
        let names = children
            .iter()
            .map(|&id| tree.node(id).unwrap().display_name())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["zeta/", "alpha/"]);
        assert!(tree.follow_path("alpha/b.txt").is_ok());
        assert!(tree.follow_path("alpha/a.txt").is_ok());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn scalar_values_are_rejected() {
        let result = seed_from("docs: 3");
        assert!(matches!(
            result,
            Err(ConfigCreationError::InvalidSeedEntry { ref name }) if name == "docs"
        ));
    }

    #[test]
    fn seed_section_must_be_a_map() {
        let result: Result<ShellConfig, _> = "seed:\n  - a\n  - b".try_into();
        assert!(matches!(result, Err(ConfigCreationError::SeedNotMap)));
    }

    #[test]
    fn empty_seed_section_is_allowed() {
        let config: ShellConfig = "seed:".try_into().unwrap();
        assert!(config.seed.is_empty());
    }

    #[test]
    fn invalid_names_surface_when_applied() {
        let seed = seed_from("\"..\": ~").unwrap();
        let mut tree = Tree::new();
        assert!(matches!(
            seed.apply(&mut tree),
            Err(TreeError::InvalidName { .. })
        ));
    }
}
