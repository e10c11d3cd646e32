use std::collections::HashMap;
use std::sync::Arc;

use egui::epaint::EllipseShape;
use egui::{Align2, Color32, FontId, Galley, Pos2, Rect, Sense, Stroke, Vec2};

use crate::graph::{AirportNode, NodeColor, RouteLink};

const NODE_PADDING: Vec2 = Vec2::new(14.0, 9.0);
const LABEL_FONT_SIZE: f32 = 13.0;
const GLYPH_FONT_SIZE: f32 = 15.0;
const ARROW_HEAD_LEN: f32 = 9.0;

const SEED_RADIUS_PER_NODE: f32 = 46.0;
const MIN_SEED_RADIUS: f32 = 120.0;
const REPULSION: f32 = 160_000.0;
const SPRING_LENGTH: f32 = 230.0;
const SPRING_STRENGTH: f32 = 0.015;
const CENTER_PULL: f32 = 0.01;
const DAMPING: f32 = 0.6;
const MAX_STEP: f32 = 18.0;

const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 4.0;
const FOCUS_ZOOM: f32 = 1.6;

/// Pan/zoom camera over the abstract graph plane. A pure view transform;
/// nothing the user does with it flows back into the node/link model.
#[derive(Debug)]
pub struct Camera {
    center: Vec2,
    zoom: f32,
}

impl Camera {
    fn new() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    fn project(&self, viewport: &Rect, point: Vec2) -> Pos2 {
        viewport.center() + (point - self.center) * self.zoom
    }

    fn pan(&mut self, screen_delta: Vec2) {
        self.center -= screen_delta / self.zoom;
    }

    fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Centers on `point` and zooms in on it, as for a node double-click.
    fn focus(&mut self, point: Vec2) {
        self.center = point;
        self.zoom = self.zoom.max(FOCUS_ZOOM);
    }
}

/// Read-only node-link view of the derived route graph. Owns the layout
/// positions and the camera; the graph model itself is never mutated here.
pub struct DiagramView {
    camera: Camera,
    positions: HashMap<String, Vec2>,
    velocities: HashMap<String, Vec2>,
}

impl Default for DiagramView {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramView {
    pub fn new() -> Self {
        Self {
            camera: Camera::new(),
            positions: HashMap::new(),
            velocities: HashMap::new(),
        }
    }

    /// Seeds unseen nodes on a circle, in node-list order, and drops layout
    /// state for nodes that no longer exist.
    fn sync_layout(&mut self, airports: &[AirportNode]) {
        self.positions
            .retain(|key, _| airports.iter().any(|a| a.key == *key));
        self.velocities
            .retain(|key, _| airports.iter().any(|a| a.key == *key));

        let count = airports.len().max(1);
        let radius =
            MIN_SEED_RADIUS.max(SEED_RADIUS_PER_NODE * count as f32 / std::f32::consts::TAU);

        for (index, airport) in airports.iter().enumerate() {
            if !self.positions.contains_key(&airport.key) {
                let angle = std::f32::consts::TAU * index as f32 / count as f32;
                self.positions.insert(
                    airport.key.clone(),
                    Vec2::new(angle.cos(), angle.sin()) * radius,
                );
                self.velocities.insert(airport.key.clone(), Vec2::ZERO);
            }
        }
    }

    /// One force-directed step: pairwise repulsion, springs along links, a
    /// gentle pull toward the origin. The layout settles over a handful of
    /// frames instead of being solved in one shot.
    fn relax(&mut self, airports: &[AirportNode], links: &[RouteLink]) {
        let keys: Vec<&str> = airports.iter().map(|a| a.key.as_str()).collect();
        let index_of: HashMap<&str, usize> =
            keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
        let current: Vec<Vec2> = keys.iter().map(|k| self.positions[*k]).collect();
        let mut forces = vec![Vec2::ZERO; keys.len()];

        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let delta = current[i] - current[j];
                let distance = delta.length().max(24.0);
                let push = delta / distance * (REPULSION / (distance * distance));
                forces[i] += push;
                forces[j] -= push;
            }
        }

        for link in links {
            let (Some(&from), Some(&to)) = (
                index_of.get(link.from.as_str()),
                index_of.get(link.to.as_str()),
            ) else {
                continue;
            };
            if from == to {
                continue;
            }
            let delta = current[from] - current[to];
            let distance = delta.length().max(1.0);
            let pull = delta / distance * ((distance - SPRING_LENGTH) * SPRING_STRENGTH);
            forces[from] -= pull;
            forces[to] += pull;
        }

        for (i, key) in keys.iter().enumerate() {
            let force = forces[i] - current[i] * CENTER_PULL;
            let velocity = self.velocities.entry(key.to_string()).or_insert(Vec2::ZERO);
            *velocity = (*velocity + force) * DAMPING;
            let mut step = *velocity;
            if step.length() > MAX_STEP {
                step = step / step.length() * MAX_STEP;
            }
            self.positions.insert(key.to_string(), current[i] + step);
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, airports: &[AirportNode], links: &[RouteLink]) {
        self.sync_layout(airports);
        self.relax(airports, links);

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let viewport = response.rect;

        if response.dragged() {
            self.camera.pan(response.drag_delta());
        }
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 && response.hovered() {
            self.camera.zoom_by(zoom_delta);
        }

        // Label galleys first, so links can stop at node boundaries.
        let drawn: Vec<(Pos2, Vec2, Arc<Galley>, &AirportNode)> = airports
            .iter()
            .map(|node| {
                let center = self
                    .camera
                    .project(&viewport, self.positions[node.key.as_str()]);
                let galley = painter.layout_no_wrap(
                    node.text.clone(),
                    FontId::proportional(LABEL_FONT_SIZE),
                    Color32::BLACK,
                );
                let half = galley.size() * 0.5 + NODE_PADDING;
                (center, half, galley, node)
            })
            .collect();

        let node_extents: HashMap<&str, (Pos2, Vec2)> = drawn
            .iter()
            .map(|(center, half, _, node)| (node.key.as_str(), (*center, *half)))
            .collect();

        for link in links {
            draw_link(&painter, link, &node_extents);
        }

        for (center, half, galley, node) in drawn {
            painter.add(EllipseShape {
                center,
                radius: half,
                fill: node_fill(node.color),
                stroke: Stroke::new(1.0, Color32::DARK_GRAY),
            });
            painter.galley(center - galley.size() * 0.5, galley, Color32::BLACK);

            let rect = Rect::from_center_size(center, half * 2.0);
            let node_response = ui
                .allocate_rect(rect, Sense::click())
                .on_hover_text(format!("{} (last flight {})", node.text, node.flight_date));
            if node_response.double_clicked() {
                if let Some(&point) = self.positions.get(node.key.as_str()) {
                    self.camera.focus(point);
                }
            }
        }
    }
}

fn node_fill(color: NodeColor) -> Color32 {
    match color {
        NodeColor::LightGray => Color32::LIGHT_GRAY,
        NodeColor::Red => Color32::RED,
    }
}

/// Distance from an ellipse center to its boundary along `dir`.
fn ellipse_radius(half: Vec2, dir: Vec2) -> f32 {
    let x = half.y * dir.x;
    let y = half.x * dir.y;
    let denom = (x * x + y * y).sqrt();
    if denom <= f32::EPSILON {
        half.x.min(half.y)
    } else {
        half.x * half.y / denom
    }
}

fn draw_link(
    painter: &egui::Painter,
    link: &RouteLink,
    nodes: &HashMap<&str, (Pos2, Vec2)>,
) {
    let (Some(&(from_center, from_half)), Some(&(to_center, to_half))) =
        (nodes.get(link.from.as_str()), nodes.get(link.to.as_str()))
    else {
        return;
    };

    let delta = to_center - from_center;
    let distance = delta.length();
    if distance < 1.0 {
        return;
    }
    let dir = delta / distance;
    let start = from_center + dir * ellipse_radius(from_half, dir);
    let end = to_center - dir * ellipse_radius(to_half, dir);

    let stroke = Stroke::new(1.5, Color32::GRAY);
    painter.line_segment([start, end], stroke);

    let side = Vec2::new(-dir.y, dir.x);
    painter.line_segment(
        [end, end - dir * ARROW_HEAD_LEN + side * (ARROW_HEAD_LEN * 0.5)],
        stroke,
    );
    painter.line_segment(
        [end, end - dir * ARROW_HEAD_LEN - side * (ARROW_HEAD_LEN * 0.5)],
        stroke,
    );

    // The model's "plane" marker renders as a glyph at the midpoint.
    if link.text == "plane" {
        painter.text(
            from_center + delta * 0.5,
            Align2::CENTER_CENTER,
            "✈",
            FontId::proportional(GLYPH_FONT_SIZE),
            Color32::DARK_GRAY,
        );
    }
}
