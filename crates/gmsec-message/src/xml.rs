use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use gmsec_types::{Field, FieldValue, MessageKind, TypeTag};

use crate::coerce::parse_field_value;
use crate::error::MessageError;
use crate::message::Message;
use crate::selector::Selector;

/// Renders `message` in the documented `<MESSAGE>`/`<FIELD>` XML form.
pub fn to_xml(message: &Message) -> String {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut root = BytesStart::new("MESSAGE");
    root.push_attribute(("SUBJECT", message.subject()));
    root.push_attribute(("KIND", message.kind().as_str()));
    writer
        .write_event(Event::Start(root))
        .expect("in-memory write cannot fail");

    for field in message.fields(Selector::All) {
        let mut elem = BytesStart::new("FIELD");
        elem.push_attribute(("NAME", field.name.as_str()));
        elem.push_attribute(("TYPE", field.type_tag().as_str()));
        elem.push_attribute(("HEAD", if field.is_header { "T" } else { "F" }));
        writer
            .write_event(Event::Start(elem))
            .expect("in-memory write cannot fail");
        writer
            .write_event(Event::Text(BytesText::new(&field.as_string_form())))
            .expect("in-memory write cannot fail");
        writer
            .write_event(Event::End(BytesEnd::new("FIELD")))
            .expect("in-memory write cannot fail");
    }
    writer
        .write_event(Event::End(BytesEnd::new("MESSAGE")))
        .expect("in-memory write cannot fail");

    String::from_utf8(writer.into_inner().into_inner()).expect("writer output is valid utf-8")
}

/// Parses the documented `<MESSAGE>`/`<FIELD>` XML form back into a [`Message`].
pub fn from_xml(text: &str) -> Result<Message, MessageError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut message: Option<Message> = None;
    let mut current_name: Option<String> = None;
    let mut current_type: Option<TypeTag> = None;
    let mut current_head = false;
    let mut buf = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| MessageError::Xml(e.to_string()))?
        {
            Event::Start(e) if e.local_name().as_ref() == b"MESSAGE" => {
                let mut subject = String::new();
                let mut kind = MessageKind::Publish;
                for attr in e.attributes().flatten() {
                    let value = attr
                        .decode_and_unescape_value(reader.decoder())
                        .map_err(|err| MessageError::Xml(err.to_string()))?;
                    match attr.key.as_ref() {
                        b"SUBJECT" => subject = value.into_owned(),
                        b"KIND" => kind = MessageKind::parse(&value).unwrap_or(MessageKind::Publish),
                        _ => {}
                    }
                }
                message = Some(Message::new(subject, kind));
            }
            Event::Start(e) if e.local_name().as_ref() == b"FIELD" => {
                let mut name = String::new();
                let mut type_tag = TypeTag::String;
                let mut head = false;
                for attr in e.attributes().flatten() {
                    let value = attr
                        .decode_and_unescape_value(reader.decoder())
                        .map_err(|err| MessageError::Xml(err.to_string()))?;
                    match attr.key.as_ref() {
                        b"NAME" => name = value.into_owned(),
                        b"TYPE" => {
                            type_tag = TypeTag::parse(&value).ok_or_else(|| {
                                MessageError::IncorrectFieldType {
                                    field: name.clone(),
                                    expected: "a known TYPE".to_string(),
                                    found: value.into_owned(),
                                }
                            })?
                        }
                        b"HEAD" => head = value.as_ref() == "T",
                        _ => {}
                    }
                }
                current_name = Some(name);
                current_type = Some(type_tag);
                current_head = head;
            }
            Event::Text(e) => {
                if let (Some(name), Some(type_tag)) = (current_name.take(), current_type.take()) {
                    let text = e
                        .unescape()
                        .map_err(|err| MessageError::Xml(err.to_string()))?;
                    let value = parse_field_value(&name, type_tag, &text)?;
                    push_field(&mut message, name, value, current_head)?;
                } else {
                    current_name = None;
                    current_type = None;
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"FIELD" => {
                // Empty-content fields (e.g. an empty STRING) never reach the
                // Text branch; finalize them here.
                if let (Some(name), Some(type_tag)) = (current_name.take(), current_type.take()) {
                    let value = parse_field_value(&name, type_tag, "")?;
                    push_field(&mut message, name, value, current_head)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    message.ok_or_else(|| MessageError::Xml("no <MESSAGE> element found".to_string()))
}

fn push_field(
    message: &mut Option<Message>,
    name: String,
    value: FieldValue,
    is_header: bool,
) -> Result<(), MessageError> {
    let message = message
        .as_mut()
        .ok_or_else(|| MessageError::Xml("<FIELD> outside <MESSAGE>".to_string()))?;
    let field = if is_header {
        Field::header(name, value)
    } else {
        Field::new(name, value)
    };
    message.add_field(field)
}
