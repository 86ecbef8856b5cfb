use std::collections::HashSet;

use log::{debug, info, warn};

use crate::assembler::{self, GroupKey, OrderKey};
use crate::baseline::build_baseline;
use crate::error::TransectError;
use crate::options::GridOptions;
use crate::perpendicular::build_perpendiculars;
use crate::survey_types::*;

/// Output of a single site, built independently of every other site.
struct SiteBlock {
    baseline: Option<BaselineTransect>,
    perpendiculars: Vec<PerpendicularTransect>,
}

/// Generate baselines and perpendicular transects for every site.
///
/// Invalid sites are skipped and reported in `errors`; all other sites are
/// still generated. Output follows input site order.
pub fn generate_grid(sites: &[Site], opts: &GridOptions) -> SurveyGrid {
    let mut grid = SurveyGrid::default();
    let mut seen_names: HashSet<&str> = HashSet::new();

    let blocks: Vec<Result<SiteBlock, TransectError>> = sites
        .iter()
        .map(|site| {
            validate_site(site)?;
            if !seen_names.insert(site.name.as_str()) {
                return Err(TransectError::invalid_site(
                    &site.name,
                    "duplicate site name",
                ));
            }
            build_site_block(site, opts)
        })
        .collect();

    for block in blocks {
        match block {
            Ok(block) => {
                if let Some(baseline) = block.baseline {
                    grid.baseline_waypoints.push(baseline.start.clone());
                    grid.baseline_waypoints.push(baseline.end.clone());
                    grid.baselines.push(baseline);
                }
                for perp in block.perpendiculars {
                    grid.perpendicular_waypoints.push(perp.start);
                    grid.perpendicular_waypoints.push(perp.end);
                }
            }
            Err(e) => {
                warn!("Skipping site: {e}");
                grid.errors.push(e);
            }
        }
    }

    let baseline_lines = assembler::assemble(
        &grid.baseline_waypoints,
        GroupKey::Name,
        Some(OrderKey::Location),
    );
    let perpendicular_lines = assembler::assemble(
        &grid.perpendicular_waypoints,
        GroupKey::Key,
        Some(OrderKey::Location),
    );
    collect_lines(baseline_lines, &mut grid.baseline_lines, &mut grid.errors);
    collect_lines(
        perpendicular_lines,
        &mut grid.perpendicular_lines,
        &mut grid.errors,
    );

    info!(
        "Generated {} baseline(s) and {} perpendicular transect(s) from {} site(s), {} error(s)",
        grid.baseline_lines.len(),
        grid.perpendicular_lines.len(),
        sites.len(),
        grid.errors.len()
    );

    grid
}

fn build_site_block(site: &Site, opts: &GridOptions) -> Result<SiteBlock, TransectError> {
    let baseline = opts
        .should_include(TransectKind::Baseline)
        .then(|| build_baseline(site));

    let perpendiculars = if opts.should_include(TransectKind::Perpendicular) {
        build_perpendiculars(site, opts.rotation)?
    } else {
        Vec::new()
    };

    debug!(
        "Site '{}': baseline={}, perpendiculars={}",
        site.name,
        baseline.is_some(),
        perpendiculars.len()
    );

    Ok(SiteBlock {
        baseline,
        perpendiculars,
    })
}

fn collect_lines(
    results: Vec<Result<Line, TransectError>>,
    lines: &mut Vec<Line>,
    errors: &mut Vec<TransectError>,
) {
    for result in results {
        match result {
            Ok(line) => lines.push(line),
            Err(e) => {
                warn!("Dropping line: {e}");
                errors.push(e);
            }
        }
    }
}

/// Check a site's fields before any geometry is computed.
pub fn validate_site(site: &Site) -> Result<(), TransectError> {
    let invalid = |reason: String| Err(TransectError::invalid_site(&site.name, reason));

    if site.name.trim().is_empty() {
        return invalid("name is empty".to_string());
    }

    let fields = [
        ("lat_start", site.lat_start),
        ("lon_start", site.lon_start),
        ("base_bearing", site.base_bearing),
        ("base_distance", site.base_distance),
        ("perp_bearing", site.perp_bearing),
        ("perp_start", site.perp_start),
        ("perp_spacing", site.perp_spacing),
        ("perp_distance", site.perp_distance),
    ];
    if let Some((field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return invalid(format!("{field} is not a finite number ({value})"));
    }

    if !(-90.0..=90.0).contains(&site.lat_start) {
        return invalid(format!("lat_start {} outside [-90, 90]", site.lat_start));
    }
    if !(-180.0..=180.0).contains(&site.lon_start) {
        return invalid(format!("lon_start {} outside [-180, 180]", site.lon_start));
    }
    if site.base_distance <= 0.0 {
        return invalid(format!("base_distance {} must be positive", site.base_distance));
    }
    if site.perp_spacing <= 0.0 {
        return invalid(format!("perp_spacing {} must be positive", site.perp_spacing));
    }
    if site.perp_start < 0.0 {
        return invalid(format!("perp_start {} must not be negative", site.perp_start));
    }
    if site.perp_distance < 0.0 {
        return invalid(format!(
            "perp_distance {} must not be negative",
            site.perp_distance
        ));
    }
    if site.perp_start > site.base_distance {
        return invalid(format!(
            "perp_start {} lies beyond base_distance {}",
            site.perp_start, site.base_distance
        ));
    }

    Ok(())
}
