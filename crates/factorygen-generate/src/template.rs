use std::fs;
use std::path::PathBuf;

use crate::errors::GenerationError;
use crate::expressions::ValueExpression;

const EMBEDDED_STUB: &str = include_str!("../stubs/factory.stub");

const COLUMN_INDENT: &str = "        ";

/// Placeholder positions inside a factory stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Namespace,
    Class,
    Columns,
}

impl Slot {
    const ALL: [Slot; 3] = [Slot::Namespace, Slot::Class, Slot::Columns];

    /// Token marking the slot in stub text.
    pub fn token(self) -> &'static str {
        match self {
            Slot::Namespace => "DummyModelNamespace",
            Slot::Class => "DummyClass",
            Slot::Columns => "DummyColumns",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// One `'field' => expression,` entry of the column block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLine {
    pub field: String,
    pub expression: ValueExpression,
}

impl ColumnLine {
    fn render(&self) -> String {
        let field = self.field.replace('\\', "\\\\").replace('\'', "\\'");
        format!("{COLUMN_INDENT}'{field}' => {},", self.expression)
    }
}

/// Values substituted into a factory stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryContext {
    pub namespace: String,
    pub class_name: String,
    pub columns: Vec<ColumnLine>,
}

impl FactoryContext {
    fn column_block(&self) -> String {
        self.columns
            .iter()
            .map(ColumnLine::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A parsed factory stub: literal text interleaved with typed slots.
///
/// Substituted values are never rescanned, so a namespace or column that
/// happens to contain a token is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryTemplate {
    segments: Vec<Segment>,
}

impl FactoryTemplate {
    /// Parse stub text. Every slot must appear at least once.
    pub fn parse(text: &str) -> Result<Self, GenerationError> {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some((offset, slot)) = next_slot(rest) {
            if offset > 0 {
                segments.push(Segment::Literal(rest[..offset].to_string()));
            }
            segments.push(Segment::Slot(slot));
            rest = &rest[offset + slot.token().len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        for slot in Slot::ALL {
            if !segments.contains(&Segment::Slot(slot)) {
                return Err(GenerationError::InvalidTemplate(format!(
                    "missing `{}` placeholder",
                    slot.token()
                )));
            }
        }

        Ok(Self { segments })
    }

    pub fn render(&self, context: &FactoryContext) -> String {
        let columns = context.column_block();
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Slot(Slot::Namespace) => output.push_str(&context.namespace),
                Segment::Slot(Slot::Class) => output.push_str(&context.class_name),
                Segment::Slot(Slot::Columns) => output.push_str(&columns),
            }
        }
        output
    }
}

fn next_slot(text: &str) -> Option<(usize, Slot)> {
    Slot::ALL
        .into_iter()
        .filter_map(|slot| text.find(slot.token()).map(|offset| (offset, slot)))
        .min_by_key(|(offset, _)| *offset)
}

/// Where the factory stub comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The stub bundled with the generator.
    #[default]
    Embedded,
    /// A stub file on disk.
    File(PathBuf),
}

impl TemplateSource {
    pub fn load(&self) -> Result<FactoryTemplate, GenerationError> {
        match self {
            TemplateSource::Embedded => FactoryTemplate::parse(EMBEDDED_STUB),
            TemplateSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|err| {
                    if err.kind() == std::io::ErrorKind::NotFound {
                        GenerationError::TemplateNotFound(path.clone())
                    } else {
                        GenerationError::Io(err)
                    }
                })?;
                FactoryTemplate::parse(&text)
            }
        }
    }
}
