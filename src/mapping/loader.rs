//! Mapping document loader.
//!
//! Parses the XML symbol mapping emitted by the obfuscation build step into a
//! [`MappingTable`]. The document is a three level hierarchy below an arbitrary root
//! element:
//!
//! ```xml
//! <mapping>
//!   <assembly name="Assembly-CSharp">
//!     <type fullName="Game.Player" newFullName="$A">
//!       <method oldStackTraceSignature="Game.Player:Update()" newStackTraceSignature="$A:$m()"/>
//!     </type>
//!   </assembly>
//! </mapping>
//! ```
//!
//! Every child of the root must be an `assembly` element. Children of an assembly other
//! than `type`, and children of a type other than `method`, are skipped together with
//! their subtrees. The loader either returns a complete table or an error; it never
//! hands out a partially built one.

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{
    mapping::{name::split_signature, MappingTable, MethodOverload},
    Result,
};

/// Where an open element sits in the mapping hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Assembly,
    Type,
    Skipped,
}

/// Parses a mapping document into a fresh [`MappingTable`].
///
/// # Errors
/// Returns [`crate::Error::Malformed`] when a top-level child is not an `assembly`, when a
/// `type` lacks `fullName`/`newFullName`, when a `method` lacks one of its stack-trace
/// signatures, or when the document has no root element or more than one. Returns [`crate::Error::Xml`] when
/// the input is not well-formed XML.
pub fn load(document: &str) -> Result<MappingTable> {
    let mut reader = Reader::from_str(document);
    let mut table = MappingTable::default();
    let mut scopes: Vec<Scope> = Vec::new();
    let mut has_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                check_single_root(&element, &scopes, has_root)?;
                let scope = open_element(&mut table, &element, scopes.last().copied())?;
                has_root |= scope == Scope::Root;
                scopes.push(scope);
            }
            Event::Empty(element) => {
                check_single_root(&element, &scopes, has_root)?;
                let scope = open_element(&mut table, &element, scopes.last().copied())?;
                has_root |= scope == Scope::Root;
            }
            Event::End(_) => {
                scopes.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !has_root {
        return Err(malformed_error!("Mapping document has no root element"));
    }

    log::debug!(
        "parsed symbol mapping: {} types, {} methods",
        table.type_count(),
        table.method_count()
    );
    Ok(table)
}

/// A document has exactly one root element.
fn check_single_root(element: &BytesStart<'_>, scopes: &[Scope], has_root: bool) -> Result<()> {
    if has_root && scopes.is_empty() {
        return Err(malformed_error!(
            "Unexpected top-level element {}: document already has a root element",
            element_name(element)
        ));
    }
    Ok(())
}

/// Records the element if it carries mapping data and returns the scope its children live in.
fn open_element(
    table: &mut MappingTable,
    element: &BytesStart<'_>,
    parent: Option<Scope>,
) -> Result<Scope> {
    let name = element.local_name();
    match parent {
        None => Ok(Scope::Root),
        Some(Scope::Root) => {
            if name.as_ref() != b"assembly" {
                return Err(malformed_error!(
                    "Invalid node name: {}. Expected 'assembly'",
                    element_name(element)
                ));
            }
            Ok(Scope::Assembly)
        }
        Some(Scope::Assembly) if name.as_ref() == b"type" => {
            load_type(table, element)?;
            Ok(Scope::Type)
        }
        Some(Scope::Type) if name.as_ref() == b"method" => {
            load_method(table, element)?;
            Ok(Scope::Skipped)
        }
        Some(_) => Ok(Scope::Skipped),
    }
}

fn load_type(table: &mut MappingTable, element: &BytesStart<'_>) -> Result<()> {
    let old_full_name = required_attribute(element, "fullName")?;
    let new_full_name = required_attribute(element, "newFullName")?;
    table.insert_type(&old_full_name, &new_full_name);
    Ok(())
}

fn load_method(table: &mut MappingTable, element: &BytesStart<'_>) -> Result<()> {
    let old_signature = required_attribute(element, "oldStackTraceSignature")?;
    let new_signature = required_attribute(element, "newStackTraceSignature")?;

    let (old_declaring_and_method, old_parameters) = split_signature(&old_signature);
    let (new_declaring_and_method, new_parameters) = split_signature(&new_signature);

    table.insert_method(
        new_declaring_and_method,
        MethodOverload {
            old_declaring_and_method: old_declaring_and_method.to_string(),
            old_parameters: old_parameters.to_string(),
            new_parameters: new_parameters.to_string(),
        },
    );
    Ok(())
}

fn required_attribute(element: &BytesStart<'_>, key: &str) -> Result<String> {
    let attribute = element.try_get_attribute(key).map_err(|err| {
        malformed_error!(
            "Invalid attributes on {}: {}",
            element_name(element),
            err
        )
    })?;

    match attribute {
        Some(attribute) => attribute
            .unescape_value()
            .map(|value| value.into_owned())
            .map_err(|err| {
                malformed_error!(
                    "Invalid value for attribute '{}' on {}: {}",
                    key,
                    element_name(element),
                    err
                )
            }),
        None => Err(malformed_error!(
            "Invalid node {}: attribute '{}' missing",
            element_name(element),
            key
        )),
    }
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}
