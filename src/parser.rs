use chrono::{DateTime, FixedOffset};
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::error::ParseError;
use crate::gpx_types::*;

type Result<T> = std::result::Result<T, ParseError>;

/// Parse a GPX XML string into a [`Gpx`] document.
///
/// Elements are matched by local name, so namespaced and plain documents
/// read the same way. Unknown elements (extensions, GPX 1.0 extras) are
/// skipped. Any structural problem fails the whole parse.
pub fn parse_gpx(xml: &str) -> Result<Gpx> {
    let mut reader = Reader::from_str(xml);

    let gpx = loop {
        match next_event(&mut reader)? {
            Event::Start(e) => {
                expect_root(&e)?;
                break parse_root(&mut reader)?;
            }
            Event::Empty(e) => {
                expect_root(&e)?;
                break Gpx::default();
            }
            Event::Eof => return Err(ParseError::MissingRoot),
            _ => {}
        }
    };

    // Surface errors in trailing content (e.g. a stray end tag).
    loop {
        if let Event::Eof = next_event(&mut reader)? {
            break;
        }
    }

    tracing::debug!(
        waypoints = gpx.waypoints.len(),
        routes = gpx.routes.len(),
        tracks = gpx.tracks.len(),
        "parsed GPX document"
    );
    Ok(gpx)
}

fn expect_root(e: &BytesStart<'_>) -> Result<()> {
    if e.local_name().as_ref() == b"gpx" {
        Ok(())
    } else {
        Err(ParseError::UnexpectedRoot {
            found: element_name(e),
        })
    }
}

/// Parse the children of <gpx>, up to and including its end tag.
fn parse_root<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Gpx> {
    let mut gpx = Gpx::default();

    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"metadata" => gpx.metadata = parse_metadata(reader)?,
                b"wpt" => gpx.waypoints.push(parse_point(&e, reader, "wpt")?),
                b"rte" => gpx.routes.push(parse_route(reader)?),
                b"trk" => gpx.tracks.push(parse_track(reader)?),
                // GPX 1.0 has no <metadata>; these sit directly under <gpx>.
                b"time" => gpx.metadata.time = Some(parse_time(reader, &e)?),
                b"bounds" => {
                    gpx.metadata.bounds = Some(parse_bounds(&e)?);
                    skip_element(reader, &e)?;
                }
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"wpt" => gpx.waypoints.push(point_from_attributes(&e, "wpt")?),
                b"rte" => gpx.routes.push(Route::default()),
                b"trk" => gpx.tracks.push(Track::default()),
                b"bounds" => gpx.metadata.bounds = Some(parse_bounds(&e)?),
                b"time" => gpx.metadata.time = Some(time_from_text(String::new())?),
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("gpx")),
            _ => {}
        }
    }

    Ok(gpx)
}

/// Parse a <metadata> element.
fn parse_metadata<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Metadata> {
    let mut metadata = Metadata::default();

    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"link" => metadata.link = Some(parse_link(&e, reader)?),
                b"time" => metadata.time = Some(parse_time(reader, &e)?),
                b"bounds" => {
                    metadata.bounds = Some(parse_bounds(&e)?);
                    skip_element(reader, &e)?;
                }
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"link" => metadata.link = Some(link_from_attributes(&e)?),
                b"bounds" => metadata.bounds = Some(parse_bounds(&e)?),
                b"time" => metadata.time = Some(time_from_text(String::new())?),
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("metadata")),
            _ => {}
        }
    }

    Ok(metadata)
}

/// Read the extents of a <bounds> element from its attributes.
fn parse_bounds(e: &BytesStart<'_>) -> Result<Bounds> {
    let [min_lat, min_lon, max_lat, max_lon] =
        float_attributes(e, "bounds", ["minlat", "minlon", "maxlat", "maxlon"])?;
    Ok(Bounds {
        min_lat,
        min_lon,
        max_lat,
        max_lon,
    })
}

/// Parse a point element (wpt, rtept, trkpt) and its children.
/// Called after receiving Event::Start for the point element.
fn parse_point<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
    element: &'static str,
) -> Result<Waypoint> {
    let mut point = point_from_attributes(start, element)?;

    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"ele" => point.ele = parse_number(reader, &e, "ele")?,
                b"name" => point.name = Some(read_text_owned(reader, &e)?),
                b"desc" => point.desc = Some(read_text_owned(reader, &e)?),
                b"type" => point.point_type = Some(read_text_owned(reader, &e)?),
                b"link" => point.link = Some(parse_link(&e, reader)?),
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"ele" => point.ele = 0.0,
                b"link" => point.link = Some(link_from_attributes(&e)?),
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof(element)),
            _ => {}
        }
    }

    Ok(point)
}

fn point_from_attributes(e: &BytesStart<'_>, element: &'static str) -> Result<Waypoint> {
    let [lat, lon] = float_attributes(e, element, ["lat", "lon"])?;
    Ok(Waypoint::new(lat, lon))
}

/// Parse a <link> element.
fn parse_link<'a>(start: &BytesStart<'a>, reader: &mut Reader<&'a [u8]>) -> Result<Link> {
    let mut link = link_from_attributes(start)?;

    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"text" => link.text = Some(read_text_owned(reader, &e)?),
                b"type" => link.mime_type = Some(read_text_owned(reader, &e)?),
                _ => skip_element(reader, &e)?,
            },
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("link")),
            _ => {}
        }
    }

    Ok(link)
}

fn link_from_attributes(e: &BytesStart<'_>) -> Result<Link> {
    let mut link = Link::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|source| ParseError::Attribute {
            element: "link",
            source,
        })?;
        if attr.key.local_name().as_ref() == b"href" {
            let raw = std::str::from_utf8(&attr.value).map_err(|_| ParseError::Utf8 {
                element: "link".to_string(),
            })?;
            link.href = Some(unescape(raw)?.into_owned());
        }
    }
    Ok(link)
}

/// Parse a <rte> element.
fn parse_route<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Route> {
    let mut route = Route::default();

    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"name" => route.name = Some(read_text_owned(reader, &e)?),
                b"desc" => route.desc = Some(read_text_owned(reader, &e)?),
                b"type" => route.route_type = Some(read_text_owned(reader, &e)?),
                b"link" => route.link = Some(parse_link(&e, reader)?),
                b"rtept" => route.points.push(parse_point(&e, reader, "rtept")?),
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"rtept" => route.points.push(point_from_attributes(&e, "rtept")?),
                b"link" => route.link = Some(link_from_attributes(&e)?),
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("rte")),
            _ => {}
        }
    }

    Ok(route)
}

/// Parse a <trk> element, flattening all of its segments.
fn parse_track<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Track> {
    let mut track = Track::default();

    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"name" => track.name = Some(read_text_owned(reader, &e)?),
                b"desc" => track.desc = Some(read_text_owned(reader, &e)?),
                b"type" => track.track_type = Some(read_text_owned(reader, &e)?),
                b"link" => track.link = Some(parse_link(&e, reader)?),
                b"trkseg" => parse_segment(reader, &mut track.points)?,
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"link" {
                    track.link = Some(link_from_attributes(&e)?);
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("trk")),
            _ => {}
        }
    }

    Ok(track)
}

/// Parse a <trkseg> element, appending its points to `points`.
fn parse_segment<'a>(reader: &mut Reader<&'a [u8]>, points: &mut Vec<Waypoint>) -> Result<()> {
    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"trkpt" => points.push(parse_point(&e, reader, "trkpt")?),
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"trkpt" {
                    points.push(point_from_attributes(&e, "trkpt")?);
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof("trkseg")),
            _ => {}
        }
    }

    Ok(())
}

fn parse_number<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'_>,
    element: &'static str,
) -> Result<f64> {
    let text = read_text_owned(reader, start)?;
    if text.trim().is_empty() {
        return Ok(0.0);
    }
    text.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            element,
            value: text,
        })
}

fn parse_time<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'_>,
) -> Result<DateTime<FixedOffset>> {
    time_from_text(read_text_owned(reader, start)?)
}

/// `<time/>` carries no timestamp and fails like any other unparsable one.
fn time_from_text(text: String) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map_err(|source| ParseError::InvalidTimestamp { value: text, source })
}

/// Read the named float attributes of an element; all of them are required.
fn float_attributes<const N: usize>(
    e: &BytesStart<'_>,
    element: &'static str,
    names: [&'static str; N],
) -> Result<[f64; N]> {
    let mut found = [None; N];

    for attr in e.attributes() {
        let attr = attr.map_err(|source| ParseError::Attribute { element, source })?;
        let key = attr.key.local_name();
        let Some(i) = names.iter().position(|n| n.as_bytes() == key.as_ref()) else {
            continue;
        };
        let raw = std::str::from_utf8(&attr.value).map_err(|_| ParseError::Utf8 {
            element: element.to_string(),
        })?;
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidAttribute {
                element,
                attribute: names[i],
                value: raw.to_string(),
            })?;
        found[i] = Some(value);
    }

    let mut values = [0.0; N];
    for (i, value) in found.into_iter().enumerate() {
        values[i] = value.ok_or(ParseError::MissingAttribute {
            element,
            attribute: names[i],
        })?;
    }
    Ok(values)
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references (Event::GeneralRef).
fn read_text_owned<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let mut text = String::new();

    loop {
        match next_event(reader)? {
            Event::Text(e) => text.push_str(utf8(e.as_ref(), start)?),
            Event::CData(e) => text.push_str(utf8(e.as_ref(), start)?),
            Event::GeneralRef(e) => {
                let name = utf8(e.as_ref(), start)?;
                let resolved = match e.resolve_char_ref() {
                    Ok(Some(ch)) => Some(ch.to_string()),
                    Ok(None) => resolve_predefined_entity(name).map(str::to_string),
                    Err(_) => None,
                };
                match resolved {
                    Some(resolved) => text.push_str(&resolved),
                    None => {
                        return Err(ParseError::UnknownEntity {
                            element: element_name(start),
                            entity: name.to_string(),
                        });
                    }
                }
            }
            Event::Start(e) => skip_element(reader, &e)?,
            Event::End(_) => break,
            Event::Eof => return Err(unexpected_eof(&element_name(start))),
            _ => {}
        }
    }

    Ok(text)
}

fn skip_element<'a>(reader: &mut Reader<&'a [u8]>, e: &BytesStart<'_>) -> Result<()> {
    tracing::trace!(element = %element_name(e), "skipping element");
    reader
        .read_to_end(e.name())
        .map_err(|source| xml_error(reader, source))?;
    Ok(())
}

fn next_event<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Event<'a>> {
    reader
        .read_event()
        .map_err(|source| xml_error(reader, source))
}

fn xml_error(reader: &Reader<&[u8]>, source: quick_xml::Error) -> ParseError {
    ParseError::Xml {
        position: reader.error_position() as u64,
        source,
    }
}

fn unexpected_eof(element: &str) -> ParseError {
    ParseError::UnexpectedEof {
        element: element.to_string(),
    }
}

fn utf8<'b>(bytes: &'b [u8], start: &BytesStart<'_>) -> Result<&'b str> {
    std::str::from_utf8(bytes).map_err(|_| ParseError::Utf8 {
        element: element_name(start),
    })
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}
