//! Enum class generation.

use avropy_schema::TypeDefinition;

use crate::classify::classify;
use crate::python::push_line;
use crate::python::records::push_docstring;

/// Generator for enum class definitions.
///
/// Emits one named constant per symbol, each valued as its own name.
/// Symbol order follows the declaration; unlike record fields it carries
/// meaning and is never re-sorted.
pub struct EnumClassGenerator<'a> {
    def: &'a TypeDefinition,
}

impl<'a> EnumClassGenerator<'a> {
    /// Creates a new enum class generator.
    #[must_use]
    pub fn new(def: &'a TypeDefinition) -> Self {
        Self { def }
    }

    /// Generates the class definition.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        push_line(
            &mut output,
            0,
            &format!(
                "class {}({}):",
                self.def.name,
                classify(self.def).superclass()
            ),
        );
        push_docstring(&mut output, self.def.doc.as_deref());
        for symbol in self.def.symbols() {
            push_line(&mut output, 1, &format!("{symbol} = \"{symbol}\""));
        }
        output
    }
}
