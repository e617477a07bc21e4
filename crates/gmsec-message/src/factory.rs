use gmsec_spec_loader::Specification;
use gmsec_types::{Field, FieldValue, MessageKind};

use crate::error::MessageError;
use crate::json::from_json;
use crate::message::Message;
use crate::xml::from_xml;

/// The two serialized forms [`MessageFactory::from_data`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
}

/// Builds [`Message`]s against a loaded [`Specification`]: pre-populated
/// from a schema ID, or parsed back from its XML/JSON serialization.
pub struct MessageFactory {
    specification: Specification,
}

impl MessageFactory {
    pub fn new(specification: Specification) -> Self {
        Self { specification }
    }

    pub fn specification(&self) -> &Specification {
        &self.specification
    }

    /// Constructs an empty message for `schema_id`, pre-populated with the
    /// header fields the schema ID's tokens can substitute into (§4.5).
    /// Header fields the ID cannot specialize keep no value here; they
    /// remain the caller's or the validator's concern.
    pub fn create_message(&self, schema_id: &str) -> Result<Message, MessageError> {
        let template = self.specification.find_template(schema_id)?;

        let tokens: Vec<&str> = schema_id.split('.').skip_while(|t| t.chars().all(|c| c.is_ascii_digit())).collect();
        let kind_token = tokens.first().copied().unwrap_or("MSG");
        let subtype_token = tokens.get(1).copied();

        let kind = match kind_token {
            "REQ" => MessageKind::Request,
            "RESP" => MessageKind::Reply,
            _ => MessageKind::Publish,
        };

        let mut message = Message::new(String::new(), kind)
            .with_schema_id(schema_id.to_string())
            .with_subject_elements(template.subject_elements.clone());

        for header in self.specification.header_fields_for(schema_id) {
            let substituted = match header.name.as_str() {
                "MESSAGE-TYPE" => Some(kind_token.to_string()),
                "MESSAGE-SUBTYPE" => subtype_token.map(str::to_string),
                _ if header.values.len() == 1 => Some(header.values[0].clone()),
                _ => None,
            };
            if let Some(value) = substituted {
                message.add_field(Field::header(header.name.clone(), FieldValue::String(value)))?;
            }
        }

        Ok(message)
    }

    /// Parses `text`, inferring the format from its leading non-whitespace
    /// character when `format` is not given explicitly.
    pub fn from_data(&self, text: &str, format: Format) -> Result<Message, MessageError> {
        match format {
            Format::Xml => from_xml(text),
            Format::Json => from_json(text),
        }
    }

    /// Parses `text`, inferring XML vs. JSON from its leading character.
    pub fn from_data_inferred(&self, text: &str) -> Result<Message, MessageError> {
        match text.trim_start().chars().next() {
            Some('<') => from_xml(text),
            _ => from_json(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmsec_spec_loader::Config;

    const HEADER_XSD: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:complexType name="HEADER">
    <xs:all>
      <xs:element name="MESSAGE-TYPE">
        <xs:complexType>
          <xs:simpleContent>
            <xs:extension base="xs:string">
              <xs:attribute name="TYPE" fixed="STRING"/>
            </xs:extension>
          </xs:simpleContent>
        </xs:complexType>
      </xs:element>
      <xs:element name="MESSAGE-SUBTYPE">
        <xs:complexType>
          <xs:simpleContent>
            <xs:extension base="xs:string">
              <xs:attribute name="TYPE" fixed="STRING"/>
            </xs:extension>
          </xs:simpleContent>
        </xs:complexType>
      </xs:element>
    </xs:all>
  </xs:complexType>
  <xs:complexType name="HeaderSubjectElements">
    <xs:element name="CONST" fixed="C2MS"/>
    <xs:element name="ME" fixed="!FILL" minOccurs="0"/>
  </xs:complexType>
</xs:schema>"#;

    const MSG_LOG_XSD: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:element name="MSG.LOG">
    <xs:complexType>
      <xs:sequence>
        <xs:element name="SUBJECT">
          <xs:complexType>
            <xs:element name="CONST" fixed="C2MS"/>
            <xs:element name="ME" fixed="!FILL" minOccurs="0"/>
          </xs:complexType>
        </xs:element>
        <xs:element name="CONTENT">
          <xs:complexType>
            <xs:all>
              <xs:element name="SEVERITY">
                <xs:complexType>
                  <xs:simpleContent>
                    <xs:extension base="xs:string">
                      <xs:attribute name="TYPE" fixed="I16"/>
                    </xs:extension>
                  </xs:simpleContent>
                </xs:complexType>
              </xs:element>
            </xs:all>
          </xs:complexType>
        </xs:element>
      </xs:sequence>
    </xs:complexType>
  </xs:element>
</xs:schema>"#;

    const DIRECTORY_XML: &str = r#"<SCHEMALIST>
  <SCHEMA NAME="HEADER" DEFINITION="" LEVEL-0="C2MS"/>
  <SCHEMA NAME="MSG.LOG" DEFINITION="MESSAGE-TYPE.MESSAGE-SUBTYPE" LEVEL-0="C2MS"/>
</SCHEMALIST>"#;

    fn fixture_factory() -> (tempfile::TempDir, MessageFactory) {
        let root = tempfile::tempdir().unwrap();
        let template_dir = root.path().join("2019.00");
        std::fs::create_dir_all(&template_dir).unwrap();
        std::fs::write(template_dir.join("DirectoryFile.xml"), DIRECTORY_XML).unwrap();
        std::fs::write(template_dir.join("C2MS_Header.xsd"), HEADER_XSD).unwrap();
        std::fs::write(template_dir.join("C2MS_Msg_Log.xsd"), MSG_LOG_XSD).unwrap();

        let mut config = Config::new();
        config
            .set("GMSEC-SCHEMA-PATH", root.path().to_str().unwrap())
            .set("GMSEC-MESSAGE-SPEC-VERSION", "201900")
            .set("GMSEC-SCHEMA-LEVEL", "0");

        let specification = Specification::load(&config).unwrap();
        (root, MessageFactory::new(specification))
    }

    #[test]
    fn test_create_message_sets_kind_and_header_fields_from_schema_id() {
        let (_root, factory) = fixture_factory();
        let message = factory.create_message("MSG.LOG").unwrap();
        assert_eq!(message.kind(), MessageKind::Publish);
        assert_eq!(message.schema_id(), Some("MSG.LOG"));
        assert_eq!(message.get_string_value("MESSAGE-TYPE").unwrap(), "MSG");
        assert_eq!(message.get_string_value("MESSAGE-SUBTYPE").unwrap(), "LOG");
    }

    #[test]
    fn test_create_message_unknown_schema_id_errors() {
        let (_root, factory) = fixture_factory();
        assert!(factory.create_message("NOT.THERE.AT.ALL").is_err());
    }

    #[test]
    fn test_from_data_inferred_dispatches_xml_and_json() {
        let (_root, factory) = fixture_factory();
        let xml = r#"<MESSAGE SUBJECT="S" KIND="PUBLISH"><FIELD NAME="A" TYPE="I32" HEAD="F">1</FIELD></MESSAGE>"#;
        let json = r#"{"MESSAGE":{"SUBJECT":"S","KIND":"PUBLISH","FIELD":[]}}"#;
        assert!(factory.from_data_inferred(xml).is_ok());
        assert!(factory.from_data_inferred(json).is_ok());
    }
}
