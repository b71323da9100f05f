//! SVG view for the browser

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::level::ShapeTable;
use crate::render::{Frame, RenderSink};
use crate::sim::EntityId;

/// Element ids the page must provide
const SVG_ID: &str = "svgCanvas";
const SCORE_ID: &str = "score";
const HIGH_SCORE_ID: &str = "hScore";

/// Set several attributes in one go
fn attr(el: &Element, attrs: &[(&str, &str)]) -> Result<(), JsValue> {
    for (name, value) in attrs {
        el.set_attribute(name, value)?;
    }
    Ok(())
}

/// Shapes created once at startup, then moved and recoloured every frame
pub struct SvgView {
    elements: HashMap<EntityId, Element>,
    score: Option<Element>,
    high_score: Option<Element>,
}

impl SvgView {
    /// Append one `rect` per shape to `#svgCanvas`, in paint order
    pub fn mount(document: &Document, shapes: &ShapeTable) -> Result<Self, JsValue> {
        let svg = document
            .get_element_by_id(SVG_ID)
            .ok_or_else(|| JsValue::from_str("page has no #svgCanvas element"))?;
        let namespace = svg.namespace_uri();

        let mut elements = HashMap::with_capacity(shapes.len());
        for shape in shapes.iter() {
            let rect = document.create_element_ns(namespace.as_deref(), "rect")?;
            let (width, height) = (shape.width.to_string(), shape.height.to_string());
            attr(
                &rect,
                &[
                    ("id", shape.element_id.as_str()),
                    ("width", width.as_str()),
                    ("height", height.as_str()),
                    ("style", shape.fill.as_str()),
                ],
            )?;
            svg.append_child(&rect)?;
            elements.insert(shape.id, rect);
        }
        log::info!("Mounted {} shapes", elements.len());

        let score = document.get_element_by_id(SCORE_ID);
        let high_score = document.get_element_by_id(HIGH_SCORE_ID);
        if score.is_none() || high_score.is_none() {
            log::warn!("HUD elements #{SCORE_ID}/#{HIGH_SCORE_ID} missing; scores will not show");
        }

        Ok(Self {
            elements,
            score,
            high_score,
        })
    }
}

impl RenderSink for SvgView {
    fn present(&mut self, frame: &Frame) {
        for sprite in &frame.sprites {
            let Some(el) = self.elements.get(&sprite.id) else {
                log::warn!("No element for entity {}", sprite.id);
                continue;
            };
            let _ = el.set_attribute("transform", &sprite.transform());
            if let Some(style) = sprite.look.style() {
                let _ = el.set_attribute("style", style);
            }
        }

        if let Some(el) = &self.score {
            el.set_text_content(Some(&frame.score_text));
        }
        if let Some(el) = &self.high_score {
            el.set_text_content(Some(&frame.high_score_text));
        }
    }
}
