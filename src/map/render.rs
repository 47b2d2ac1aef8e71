//! Interactive map artifact assembly.
//!
//! The artifact is one self-contained HTML document: the marker payload and
//! map options are embedded as JSON, and a small script builds the map,
//! the lineage layer toggle, the era tag filter, and the popup charts. The
//! chart and map libraries are the only external references and are fetched
//! by the browser at view time; generation itself is fully offline.

use anyhow::{Context, Result};
use chrono::Local;
use log::warn;
use serde::Serialize;

use crate::annotations::types::Lineage;
use crate::cluster::aggregate::ClusterSummary;
use crate::config::Config;
use crate::map::sunburst::{self, SunburstData};

/// One marker's embedded payload.
#[derive(Debug, Serialize)]
pub struct MarkerData {
    /// Layer key: "Y" or "mtDNA".
    pub lineage: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// Popup header: countries, individual count, era range.
    pub summary: String,
    /// Era-bin labels for the tag filter.
    pub tags: Vec<&'static str>,
    pub sunburst: SunburstData,
}

/// Turns a cluster summary into its marker payload. An empty cluster has
/// nothing to show: its marker is omitted and the event logged.
pub fn marker_data(lineage: Lineage, cluster: &ClusterSummary) -> Option<MarkerData> {
    if cluster.total_count() == 0 {
        warn!(
            "{}: cluster {} has no members; marker omitted",
            lineage.label(),
            cluster.id
        );
        return None;
    }

    let mut summary = format!(
        "{}<br>{} individuals",
        cluster.country_display(),
        cluster.total_count()
    );
    if let Some(era_range) = &cluster.era_range {
        summary.push_str("<br>");
        summary.push_str(era_range);
    }

    Some(MarkerData {
        lineage: lineage.label(),
        lat: cluster.centroid.0,
        lon: cluster.centroid.1,
        summary,
        tags: cluster.tags.clone(),
        sunburst: sunburst::build_sunburst(&cluster.records),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions<'a> {
    center: [f64; 2],
    zoom: f64,
    min_zoom: u8,
    max_zoom: u8,
    tile_url: &'a str,
    attribution: &'a str,
}

/// Assembles the complete HTML document.
pub fn render_map(markers: &[MarkerData], era_tags: &[&'static str], config: &Config) -> Result<String> {
    let options = MapOptions {
        center: config.map_center,
        zoom: config.zoom_start,
        min_zoom: config.min_zoom,
        max_zoom: config.max_zoom,
        tile_url: &config.tile_url,
        attribution: &config.tile_attribution,
    };

    let markers_json = serde_json::to_string(markers).context("failed to encode marker payload")?;
    let tags_json = serde_json::to_string(era_tags).context("failed to encode era tags")?;
    let options_json = serde_json::to_string(&options).context("failed to encode map options")?;

    let mut html = String::with_capacity(markers_json.len() + 8 * 1024);
    html.push_str(DOCUMENT_HEAD);
    html.push_str("<script>\n");
    html.push_str(&format!("const MARKERS = {};\n", markers_json));
    html.push_str(&format!("const ERA_TAGS = {};\n", tags_json));
    html.push_str(&format!("const MAP_OPTIONS = {};\n", options_json));
    html.push_str("</script>\n");
    html.push_str(MAP_SCRIPT);
    html.push_str(&format!(
        "<div class=\"footer\">Generated {}</div>\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));
    html.push_str(DOCUMENT_TAIL);
    Ok(html)
}

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Ancient DNA haplogroup map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js" charset="utf-8"></script>
<style>
html, body { height: 100%; margin: 0; }
#map { height: 100%; }
.popup-head h4 { margin: 0 0 4px 0; font-family: Arial, sans-serif; font-size: 15px; }
.sunburst { width: 360px; height: 230px; }
.era-filter { background: white; padding: 6px; border-radius: 4px; box-shadow: 0 1px 4px rgba(0,0,0,0.4); max-width: 130px; }
.era-filter button { display: block; width: 100%; margin: 1px 0; border: 1px solid #888; background: #f4f4f4; font-size: 11px; cursor: pointer; }
.era-filter button.active { background: #316395; color: white; }
.footer { position: absolute; bottom: 2px; left: 4px; z-index: 1000; font: 10px Arial, sans-serif; color: #ddd; }
</style>
</head>
<body>
<div id="map"></div>
"#;

const MAP_SCRIPT: &str = r#"<script>
var map = L.map('map', {
  zoomSnap: 0.5,
  minZoom: MAP_OPTIONS.minZoom,
  maxZoom: MAP_OPTIONS.maxZoom,
  maxBounds: [[-90, -180], [90, 180]],
  maxBoundsViscosity: 1.0
}).setView(MAP_OPTIONS.center, MAP_OPTIONS.zoom);

L.tileLayer(MAP_OPTIONS.tileUrl, { attribution: MAP_OPTIONS.attribution }).addTo(map);

var lineageLayers = { 'Y': L.layerGroup(), 'mtDNA': L.layerGroup() };
var entries = [];

MARKERS.forEach(function (data, i) {
  var marker = L.circleMarker([data.lat, data.lon], {
    radius: 5, color: 'black', weight: 1, fill: true, fillColor: 'black', fillOpacity: 1
  });
  marker.bindPopup(
    '<div class="popup-head"><h4>' + data.summary + '</h4></div>' +
    '<div id="sunburst-' + i + '" class="sunburst"></div>',
    { maxWidth: 380 }
  );
  marker.on('popupopen', function () { renderSunburst(i); });
  entries.push({ marker: marker, tags: data.tags, lineage: data.lineage });
});

function renderSunburst(i) {
  var el = document.getElementById('sunburst-' + i);
  if (!el || el.dataset.done) { return; }
  el.dataset.done = '1';
  var burst = MARKERS[i].sunburst;
  Plotly.newPlot(el, [{
    type: 'sunburst',
    ids: burst.ids,
    labels: burst.labels,
    parents: burst.parents,
    values: burst.values,
    marker: { colors: burst.colors },
    branchvalues: 'total',
    maxdepth: 3,
    hovertemplate: '%{value}<br>%{percentRoot:.0%}<extra></extra>'
  }], {
    margin: { t: 0, l: 10, r: 10, b: 0 }, width: 360, height: 230
  }, { displaylogo: false, displayModeBar: false });
}

var activeTags = [];

function markerVisible(entry) {
  if (activeTags.length === 0) { return true; }
  return entry.tags.some(function (tag) { return activeTags.indexOf(tag) !== -1; });
}

function applyFilter() {
  entries.forEach(function (entry) {
    var layer = lineageLayers[entry.lineage];
    if (markerVisible(entry)) { layer.addLayer(entry.marker); }
    else { layer.removeLayer(entry.marker); }
  });
}

applyFilter();
lineageLayers['Y'].addTo(map);
L.control.layers(lineageLayers, null, { collapsed: false, position: 'topright' }).addTo(map);

var EraFilter = L.Control.extend({
  options: { position: 'topleft' },
  onAdd: function () {
    var container = L.DomUtil.create('div', 'era-filter');
    L.DomEvent.disableClickPropagation(container);
    ERA_TAGS.forEach(function (tag) {
      var button = L.DomUtil.create('button', '', container);
      button.textContent = tag + ' BP';
      button.addEventListener('click', function () {
        var at = activeTags.indexOf(tag);
        if (at === -1) { activeTags.push(tag); button.classList.add('active'); }
        else { activeTags.splice(at, 1); button.classList.remove('active'); }
        applyFilter();
      });
    });
    return container;
  }
});
map.addControl(new EraFilter());
</script>
"#;

const DOCUMENT_TAIL: &str = r#"</body>
</html>
"#;
