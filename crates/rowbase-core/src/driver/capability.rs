use crate::sql::Placeholder;

#[derive(Debug)]
pub struct Capability {
    /// Native parameter marker. Portable `?` placeholders are rewritten to
    /// this before a statement reaches the driver.
    pub placeholder: Placeholder,

    /// Statement that opens an explicit transaction.
    pub begin: &'static str,
}

impl Capability {
    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        placeholder: Placeholder::QuestionMark,
        begin: "START TRANSACTION",
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        placeholder: Placeholder::Dollar,
        begin: "BEGIN",
    };
}
