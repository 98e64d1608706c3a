use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DxfError {
    #[error("DXF I/O error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("DXF parse error: expected an even number of lines (code/value pairs)")]
    OddNumberOfLines,
    #[error("DXF parse error: invalid group code {raw:?} at line {line}")]
    InvalidGroupCode { raw: String, line: usize },
    #[error("DXF parse error: missing ENTITIES section")]
    MissingEntitiesSection,
    #[error("DXF parse error: unexpected end of file while parsing {context}")]
    UnexpectedEof { context: &'static str },
    #[error("DXF parse error: missing required group code {code} for entity {entity}")]
    MissingRequiredGroup { entity: &'static str, code: i32 },
    #[error("DXF parse error: invalid number {raw:?} for group code {code} in {entity}")]
    InvalidNumber {
        entity: &'static str,
        code: i32,
        raw: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DxfWriteError {
    #[error("DXF write error: non-finite value for {what}")]
    NonFinite { what: &'static str },
    #[error("DXF write error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// In-memory drawing: a layer table plus entities that reference layers by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dxf {
    pub layers: Vec<LayerDef>,
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerDef {
    pub name: String,
    /// AutoCAD colour index.
    pub color: i16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Line(Line),
    Arc(Arc),
    LwPolyline(LwPolyline),
    Unsupported(Unsupported),
}

impl Entity {
    #[must_use]
    pub fn layer(&self) -> Option<&str> {
        match self {
            Entity::Line(l) => Some(&l.layer),
            Entity::Arc(a) => Some(&a.layer),
            Entity::LwPolyline(p) => Some(&p.layer),
            Entity::Unsupported(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unsupported {
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub layer: String,
    pub start: Point2,
    pub end: Point2,
}

/// Counter-clockwise arc from `start_angle_deg` to `end_angle_deg`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub layer: String,
    pub center: Point2,
    pub radius: f64,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub layer: String,
    pub vertices: Vec<Point2>,
    /// One bulge per vertex, describing the segment that leaves it.
    pub bulges: Vec<f64>,
    pub closed: bool,
}

#[derive(Debug, Clone, Copy)]
struct Group<'a> {
    code: i32,
    value: &'a str,
}

impl Dxf {
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&LayerDef> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn entities_on<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.layer() == Some(layer))
    }

    pub fn to_dxf_string(&self) -> Result<String, DxfWriteError> {
        let mut out = String::new();
        push_pair(&mut out, 0, "SECTION");
        push_pair(&mut out, 2, "HEADER");
        push_pair(&mut out, 9, "$INSUNITS");
        push_pair(&mut out, 70, "4"); // millimeters
        push_pair(&mut out, 0, "ENDSEC");
        push_pair(&mut out, 0, "SECTION");
        push_pair(&mut out, 2, "TABLES");
        push_pair(&mut out, 0, "TABLE");
        push_pair(&mut out, 2, "LTYPE");
        push_pair(&mut out, 0, "LTYPE");
        push_pair(&mut out, 72, "65");
        push_pair(&mut out, 70, "64");
        push_pair(&mut out, 2, "CONTINUOUS");
        push_pair(&mut out, 3, "______");
        push_pair(&mut out, 73, "0");
        push_pair(&mut out, 40, "0");
        push_pair(&mut out, 0, "ENDTAB");
        push_pair(&mut out, 0, "TABLE");
        push_pair(&mut out, 2, "LAYER");
        push_pair(&mut out, 70, self.layers.len().to_string());
        for layer in &self.layers {
            push_pair(&mut out, 0, "LAYER");
            push_pair(&mut out, 2, &layer.name);
            push_pair(&mut out, 70, "0");
            push_pair(&mut out, 62, layer.color.to_string());
            push_pair(&mut out, 6, "CONTINUOUS");
        }
        push_pair(&mut out, 0, "ENDTAB");
        push_pair(&mut out, 0, "ENDSEC");
        push_pair(&mut out, 0, "SECTION");
        push_pair(&mut out, 2, "ENTITIES");

        for e in &self.entities {
            match e {
                Entity::Line(l) => {
                    push_pair(&mut out, 0, "LINE");
                    push_pair(&mut out, 8, &l.layer);
                    push_pair_f64(&mut out, 10, l.start.x, "line x1")?;
                    push_pair_f64(&mut out, 20, l.start.y, "line y1")?;
                    push_pair_f64(&mut out, 11, l.end.x, "line x2")?;
                    push_pair_f64(&mut out, 21, l.end.y, "line y2")?;
                }
                Entity::Arc(a) => {
                    push_pair(&mut out, 0, "ARC");
                    push_pair(&mut out, 8, &a.layer);
                    push_pair_f64(&mut out, 10, a.center.x, "arc cx")?;
                    push_pair_f64(&mut out, 20, a.center.y, "arc cy")?;
                    push_pair_f64(&mut out, 40, a.radius, "arc r")?;
                    push_pair_f64(&mut out, 50, a.start_angle_deg, "arc start")?;
                    push_pair_f64(&mut out, 51, a.end_angle_deg, "arc end")?;
                }
                Entity::LwPolyline(p) => {
                    push_pair(&mut out, 0, "LWPOLYLINE");
                    push_pair(&mut out, 8, &p.layer);
                    push_pair(&mut out, 90, p.vertices.len().to_string());
                    push_pair(&mut out, 70, if p.closed { "1" } else { "0" });
                    for (idx, v) in p.vertices.iter().enumerate() {
                        push_pair_f64(&mut out, 10, v.x, "polyline x")?;
                        push_pair_f64(&mut out, 20, v.y, "polyline y")?;
                        let bulge = p.bulges.get(idx).copied().unwrap_or(0.0);
                        push_pair_f64(&mut out, 42, bulge, "polyline bulge")?;
                    }
                }
                // Nothing to write for entities we only ever read.
                Entity::Unsupported(_) => {}
            }
        }

        push_pair(&mut out, 0, "ENDSEC");
        push_pair(&mut out, 0, "EOF");
        Ok(out)
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), DxfWriteError> {
        let path = path.as_ref();
        let raw = self.to_dxf_string()?;
        std::fs::write(path, raw).map_err(|source| DxfWriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), entities = self.entities.len(), "wrote DXF");
        Ok(())
    }

    pub fn parse_str(input: &str) -> Result<Self, DxfError> {
        let groups = parse_groups(input)?;
        let layers = parse_layer_table(&groups)?;
        let entities = parse_entities(&groups)?;
        Ok(Self { layers, entities })
    }

    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self, DxfError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| DxfError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse_str(&raw)
    }
}

fn push_pair(out: &mut String, code: i32, value: impl AsRef<str>) {
    out.push_str(&code.to_string());
    out.push('\n');
    out.push_str(value.as_ref());
    out.push('\n');
}

fn push_pair_f64(
    out: &mut String,
    code: i32,
    value: f64,
    what: &'static str,
) -> Result<(), DxfWriteError> {
    if !value.is_finite() {
        return Err(DxfWriteError::NonFinite { what });
    }
    let mut buf = ryu::Buffer::new();
    push_pair(out, code, buf.format(value));
    Ok(())
}

fn parse_groups(input: &str) -> Result<Vec<Group<'_>>, DxfError> {
    let lines: Vec<&str> = input.lines().collect();
    if lines.len() % 2 != 0 {
        return Err(DxfError::OddNumberOfLines);
    }

    let mut groups: Vec<Group<'_>> = Vec::with_capacity(lines.len() / 2);
    for (pair_idx, pair) in lines.chunks_exact(2).enumerate() {
        let code_raw = pair[0].trim();
        let code: i32 = code_raw.parse().map_err(|_| DxfError::InvalidGroupCode {
            raw: code_raw.to_string(),
            line: pair_idx * 2 + 1,
        })?;
        groups.push(Group {
            code,
            value: pair[1].trim(),
        });
    }
    Ok(groups)
}

/// Index ranges `(kind, start..end)` of the records inside the section called `section`.
/// Each record runs from its 0-group to the next one.
fn section_records<'a>(
    groups: &[Group<'a>],
    section: &str,
) -> Result<Option<Vec<(&'a str, std::ops::Range<usize>)>>, DxfError> {
    let mut i = 0usize;
    while i < groups.len() {
        let g = groups[i];
        if g.code == 0 && g.value == "SECTION" {
            let Some(name_g) = groups.get(i + 1) else {
                return Err(DxfError::UnexpectedEof {
                    context: "SECTION name",
                });
            };
            i += 2;
            if name_g.code != 2 || name_g.value != section {
                continue;
            }

            let mut records = Vec::new();
            while i < groups.len() {
                let g = groups[i];
                if g.code == 0 && g.value == "ENDSEC" {
                    return Ok(Some(records));
                }
                i += 1;
                if g.code != 0 {
                    continue;
                }
                let start = i;
                while i < groups.len() && groups[i].code != 0 {
                    i += 1;
                }
                records.push((g.value, start..i));
            }
            return Err(DxfError::UnexpectedEof {
                context: "section body",
            });
        }
        i += 1;
    }
    Ok(None)
}

fn parse_layer_table(groups: &[Group<'_>]) -> Result<Vec<LayerDef>, DxfError> {
    let Some(records) = section_records(groups, "TABLES")? else {
        return Ok(Vec::new());
    };
    let mut layers = Vec::new();
    for (kind, range) in records {
        if kind != "LAYER" {
            continue;
        }
        let slice = &groups[range];
        let Some(name) = slice.iter().find(|g| g.code == 2) else {
            continue;
        };
        let color = match slice.iter().find(|g| g.code == 62) {
            Some(g) => parse_i16("LAYER", 62, g.value)?,
            None => 7,
        };
        layers.push(LayerDef {
            name: name.value.to_string(),
            color,
        });
    }
    Ok(layers)
}

fn parse_entities(groups: &[Group<'_>]) -> Result<Vec<Entity>, DxfError> {
    let Some(records) = section_records(groups, "ENTITIES")? else {
        return Err(DxfError::MissingEntitiesSection);
    };
    records
        .into_iter()
        .map(|(kind, range)| parse_entity(kind, &groups[range]))
        .collect()
}

fn parse_entity(kind: &str, groups: &[Group<'_>]) -> Result<Entity, DxfError> {
    match kind {
        "LINE" => Ok(Entity::Line(parse_line(groups)?)),
        "ARC" => Ok(Entity::Arc(parse_arc(groups)?)),
        "LWPOLYLINE" => Ok(Entity::LwPolyline(parse_lwpolyline(groups)?)),
        other => Ok(Entity::Unsupported(Unsupported {
            kind: other.to_string(),
        })),
    }
}

fn layer_of(groups: &[Group<'_>]) -> String {
    groups
        .iter()
        .find(|g| g.code == 8)
        .map_or_else(|| "0".to_string(), |g| g.value.to_string())
}

fn parse_line(groups: &[Group<'_>]) -> Result<Line, DxfError> {
    let entity = "LINE";
    Ok(Line {
        layer: layer_of(groups),
        start: Point2 {
            x: get_f64(entity, groups, 10)?,
            y: get_f64(entity, groups, 20)?,
        },
        end: Point2 {
            x: get_f64(entity, groups, 11)?,
            y: get_f64(entity, groups, 21)?,
        },
    })
}

fn parse_arc(groups: &[Group<'_>]) -> Result<Arc, DxfError> {
    let entity = "ARC";
    Ok(Arc {
        layer: layer_of(groups),
        center: Point2 {
            x: get_f64(entity, groups, 10)?,
            y: get_f64(entity, groups, 20)?,
        },
        radius: get_f64(entity, groups, 40)?,
        start_angle_deg: get_f64(entity, groups, 50)?,
        end_angle_deg: get_f64(entity, groups, 51)?,
    })
}

fn parse_lwpolyline(groups: &[Group<'_>]) -> Result<LwPolyline, DxfError> {
    let mut closed = false;
    let mut vertices: Vec<Point2> = Vec::new();
    let mut bulges: Vec<f64> = Vec::new();

    if let Some(g) = groups.iter().find(|g| g.code == 70) {
        closed = (parse_i16("LWPOLYLINE", 70, g.value)? & 1) != 0;
    }

    let mut last_x: Option<f64> = None;
    for g in groups {
        match g.code {
            10 => last_x = Some(parse_f64("LWPOLYLINE", 10, g.value)?),
            20 => {
                let Some(x) = last_x.take() else {
                    continue;
                };
                let y = parse_f64("LWPOLYLINE", 20, g.value)?;
                vertices.push(Point2 { x, y });
                bulges.push(0.0);
            }
            42 => {
                if let Some(last) = bulges.last_mut() {
                    *last = parse_f64("LWPOLYLINE", 42, g.value)?;
                }
            }
            _ => {}
        }
    }

    Ok(LwPolyline {
        layer: layer_of(groups),
        vertices,
        bulges,
        closed,
    })
}

fn get_f64(entity: &'static str, groups: &[Group<'_>], code: i32) -> Result<f64, DxfError> {
    let Some(g) = groups.iter().find(|g| g.code == code) else {
        return Err(DxfError::MissingRequiredGroup { entity, code });
    };
    parse_f64(entity, code, g.value)
}

fn parse_f64(entity: &'static str, code: i32, raw: &str) -> Result<f64, DxfError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DxfError::InvalidNumber {
            entity,
            code,
            raw: raw.to_string(),
        })
}

fn parse_i16(entity: &'static str, code: i32, raw: &str) -> Result<i16, DxfError> {
    raw.trim()
        .parse::<i16>()
        .map_err(|_| DxfError::InvalidNumber {
            entity,
            code,
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(layer: &str) -> Entity {
        Entity::LwPolyline(LwPolyline {
            layer: layer.to_string(),
            vertices: vec![
                Point2 { x: 0.0, y: 0.0 },
                Point2 { x: 10.0, y: 0.0 },
                Point2 { x: 10.0, y: 10.0 },
                Point2 { x: 0.0, y: 10.0 },
            ],
            bulges: vec![0.0, 0.5, 0.0, -1.0],
            closed: true,
        })
    }

    #[test]
    fn written_drawing_parses_back() {
        let dxf = Dxf {
            layers: vec![
                LayerDef {
                    name: "BOARD".to_string(),
                    color: 3,
                },
                LayerDef {
                    name: "HOLES".to_string(),
                    color: 1,
                },
            ],
            entities: vec![
                square("BOARD"),
                Entity::Arc(Arc {
                    layer: "HOLES".to_string(),
                    center: Point2 { x: 1.0, y: 2.0 },
                    radius: 2.5,
                    start_angle_deg: 0.0,
                    end_angle_deg: 180.0,
                }),
                Entity::Line(Line {
                    layer: "HOLES".to_string(),
                    start: Point2 { x: 0.0, y: 0.0 },
                    end: Point2 { x: 0.0, y: 5.0 },
                }),
            ],
        };
        let raw = dxf.to_dxf_string().unwrap();
        let back = Dxf::parse_str(&raw).unwrap();
        assert_eq!(back, dxf);
        assert_eq!(back.layer("HOLES").map(|l| l.color), Some(1));
        assert_eq!(back.entities_on("HOLES").count(), 2);
    }

    #[test]
    fn header_declares_millimeters() {
        let raw = Dxf::default().to_dxf_string().unwrap();
        assert!(raw.starts_with("0\nSECTION\n2\nHEADER\n9\n$INSUNITS\n70\n4\n"));
        assert!(raw.ends_with("0\nENDSEC\n0\nEOF\n"));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let dxf = Dxf {
            layers: vec![],
            entities: vec![Entity::Line(Line {
                layer: "0".to_string(),
                start: Point2 { x: f64::NAN, y: 0.0 },
                end: Point2 { x: 1.0, y: 0.0 },
            })],
        };
        assert!(matches!(
            dxf.to_dxf_string(),
            Err(DxfWriteError::NonFinite { what: "line x1" })
        ));
    }

    #[test]
    fn unknown_entities_are_kept_as_unsupported() {
        let raw = "0\nSECTION\n2\nENTITIES\n0\nCIRCLE\n8\n0\n10\n1\n20\n1\n40\n3\n0\nENDSEC\n0\nEOF\n";
        let dxf = Dxf::parse_str(raw).unwrap();
        assert_eq!(
            dxf.entities,
            vec![Entity::Unsupported(Unsupported {
                kind: "CIRCLE".to_string()
            })]
        );
        assert!(dxf.layers.is_empty());
    }

    #[test]
    fn malformed_input_is_reported() {
        assert!(matches!(
            Dxf::parse_str("0\nSECTION\n2\n"),
            Err(DxfError::OddNumberOfLines)
        ));
        assert!(matches!(
            Dxf::parse_str("x\nSECTION\n"),
            Err(DxfError::InvalidGroupCode { line: 1, .. })
        ));
        assert!(matches!(
            Dxf::parse_str("0\nSECTION\n2\nHEADER\n0\nENDSEC\n0\nEOF\n"),
            Err(DxfError::MissingEntitiesSection)
        ));
        assert!(matches!(
            Dxf::parse_str("0\nSECTION\n2\nENTITIES\n0\nLINE\n10\n0\n"),
            Err(DxfError::UnexpectedEof { .. })
        ));
    }
}
