use std::borrow::Cow;

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ProjectModel<'a> {
    pub name: Cow<'a, str>,
    pub authors: Vec<Cow<'a, str>>,
    /// Whether the `compile_commands.json` compilation database is generated
    pub compilation_db: bool,
}
