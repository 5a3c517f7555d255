//! OpenXR runtime probe. The loader is resolved at runtime, so a machine
//! without any XR runtime simply reports "not available" instead of failing
//! to start.

use glam::{EulerRot, Quat, Vec3};
use openxr as xr;

use crate::scene::Transform;

/// True when an OpenXR runtime is installed and reports a head-mounted
/// display. Every failure along the way downgrades to `false`.
pub fn immersive_available() -> bool {
    let entry = match unsafe { xr::Entry::load() } {
        Ok(entry) => entry,
        Err(err) => {
            log::debug!("No OpenXR loader: {}", err);
            return false;
        }
    };

    let app_info = xr::ApplicationInfo {
        application_name: "VR Cafe",
        application_version: 1,
        engine_name: "No Engine",
        engine_version: 1,
    };

    let instance = match entry.create_instance(&app_info, &xr::ExtensionSet::default(), &[]) {
        Ok(instance) => instance,
        Err(err) => {
            log::debug!("No OpenXR runtime: {}", err);
            return false;
        }
    };

    match instance.system(xr::FormFactor::HEAD_MOUNTED_DISPLAY) {
        Ok(_) => true,
        Err(err) => {
            log::debug!("No head-mounted display: {}", err);
            false
        }
    }
}

/// Converts an OpenXR pose into the scene's transform representation
/// (XYZ Euler angles).
pub fn pose_to_transform(pose: &xr::Posef) -> Transform {
    let rotation = Quat::from_xyzw(
        pose.orientation.x,
        pose.orientation.y,
        pose.orientation.z,
        pose.orientation.w,
    )
    .normalize();
    let (x, y, z) = rotation.to_euler(EulerRot::XYZ);

    Transform {
        position: Vec3::new(pose.position.x, pose.position.y, pose.position.z),
        rotation: Vec3::new(x, y, z),
        scale: Vec3::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serial_test::serial;

    #[test]
    fn test_identity_pose_converts_to_identity_transform() {
        let pose = xr::Posef {
            orientation: xr::Quaternionf {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                w: 1.0,
            },
            position: xr::Vector3f {
                x: 1.0,
                y: 1.6,
                z: -0.5,
            },
        };

        let transform = pose_to_transform(&pose);
        assert_eq!(transform.position, Vec3::new(1.0, 1.6, -0.5));
        assert_relative_eq!(transform.rotation.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(transform.rotation.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(transform.rotation.z, 0.0, epsilon = 1e-6);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_yaw_quarter_turn_round_trips() {
        let half = std::f32::consts::FRAC_PI_4; // sin/cos of 45 deg for a 90 deg turn
        let pose = xr::Posef {
            orientation: xr::Quaternionf {
                x: 0.0,
                y: half.sin(),
                z: 0.0,
                w: half.cos(),
            },
            position: xr::Vector3f {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
        };

        let transform = pose_to_transform(&pose);
        assert_relative_eq!(
            transform.rotation.y,
            std::f32::consts::FRAC_PI_2,
            epsilon = 1e-5
        );
    }

    #[test]
    #[serial]
    fn test_probe_does_not_panic() {
        // headless machines report unavailable; either answer is fine
        let _ = immersive_available();
    }
}
