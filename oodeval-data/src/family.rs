// oodeval-data/src/family.rs

use crate::transforms::Normalize;
use oodeval_core::OodError;
use std::fmt;
use std::str::FromStr;

/// The image benchmarks the loaders know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetFamily {
    Mnist,
    Fashion,
    Kmnist,
    Svhn,
    Cifar10,
    Cifar100,
    SmallImagenet,
    Imagenet,
}

/// Families served by `load_corrupted_dataset`.
pub const CORRUPTED_FAMILIES: &[DatasetFamily] = &[
    DatasetFamily::Cifar10,
    DatasetFamily::Cifar100,
    DatasetFamily::Imagenet,
];

/// Families served by `rotate_load_dataset`.
pub const ROTATION_FAMILIES: &[DatasetFamily] = &[
    DatasetFamily::Mnist,
    DatasetFamily::Fashion,
    DatasetFamily::Svhn,
    DatasetFamily::Cifar10,
    DatasetFamily::Cifar100,
];

/// Families allowed on either side of `cross_load_dataset`.
pub const CROSS_FAMILIES: &[DatasetFamily] = &[
    DatasetFamily::Mnist,
    DatasetFamily::Fashion,
    DatasetFamily::Kmnist,
    DatasetFamily::Svhn,
    DatasetFamily::Cifar10,
    DatasetFamily::Cifar100,
];

const ALL_FAMILIES: &[DatasetFamily] = &[
    DatasetFamily::Mnist,
    DatasetFamily::Fashion,
    DatasetFamily::Kmnist,
    DatasetFamily::Svhn,
    DatasetFamily::Cifar10,
    DatasetFamily::Cifar100,
    DatasetFamily::SmallImagenet,
    DatasetFamily::Imagenet,
];

impl DatasetFamily {
    /// The canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            DatasetFamily::Mnist => "MNIST",
            DatasetFamily::Fashion => "Fashion",
            DatasetFamily::Kmnist => "KMNIST",
            DatasetFamily::Svhn => "SVHN",
            DatasetFamily::Cifar10 => "CIFAR10",
            DatasetFamily::Cifar100 => "CIFAR100",
            DatasetFamily::SmallImagenet => "SmallImagenet",
            DatasetFamily::Imagenet => "Imagenet",
        }
    }

    /// Per-channel normalization statistics, if the family has any.
    pub fn normalization(self) -> Option<Normalize> {
        let (mean, std) = match self {
            DatasetFamily::Mnist => (vec![0.1307], vec![0.3081]),
            DatasetFamily::Fashion => (vec![0.2860], vec![0.3530]),
            DatasetFamily::Kmnist => (vec![0.1918], vec![0.3483]),
            DatasetFamily::Svhn => (vec![0.4377, 0.4438, 0.4728], vec![0.1980, 0.2010, 0.1970]),
            DatasetFamily::Cifar10 => (vec![0.4914, 0.4822, 0.4465], vec![0.2470, 0.2435, 0.2616]),
            DatasetFamily::Cifar100 => (vec![0.5071, 0.4866, 0.4409], vec![0.2673, 0.2564, 0.2762]),
            DatasetFamily::Imagenet => (vec![0.485, 0.456, 0.406], vec![0.229, 0.224, 0.225]),
            DatasetFamily::SmallImagenet => return None,
        };
        Some(Normalize::new(mean, std))
    }

    /// Parses `name` and checks it against the families a loader serves.
    ///
    /// # Errors
    ///
    /// Returns `OodError::UnsupportedDataset` for unknown names and for
    /// families outside `allowed`.
    pub fn parse_for(
        name: &str,
        allowed: &[DatasetFamily],
        loader: &'static str,
    ) -> Result<DatasetFamily, OodError> {
        let unsupported = || OodError::UnsupportedDataset {
            name: name.to_string(),
            loader,
            allowed: allowed.iter().map(|f| f.name()).collect(),
        };
        let family: DatasetFamily = name.parse().map_err(|_| unsupported())?;
        if allowed.contains(&family) {
            Ok(family)
        } else {
            Err(unsupported())
        }
    }
}

impl FromStr for DatasetFamily {
    type Err = OodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FAMILIES
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| OodError::UnsupportedDataset {
                name: s.to_string(),
                loader: "DatasetFamily::from_str",
                allowed: ALL_FAMILIES.iter().map(|f| f.name()).collect(),
            })
    }
}

impl fmt::Display for DatasetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for &family in ALL_FAMILIES {
            assert_eq!(family.name().parse::<DatasetFamily>().unwrap(), family);
        }
        assert!("cifar10".parse::<DatasetFamily>().is_err());
    }

    #[test]
    fn test_parse_for_rejects_families_outside_the_loader() {
        assert_eq!(
            DatasetFamily::parse_for("KMNIST", CROSS_FAMILIES, "cross_load_dataset").unwrap(),
            DatasetFamily::Kmnist
        );
        match DatasetFamily::parse_for("KMNIST", ROTATION_FAMILIES, "rotate_load_dataset") {
            Err(OodError::UnsupportedDataset { name, loader, allowed }) => {
                assert_eq!(name, "KMNIST");
                assert_eq!(loader, "rotate_load_dataset");
                assert_eq!(allowed, vec!["MNIST", "Fashion", "SVHN", "CIFAR10", "CIFAR100"]);
            }
            other => panic!("Expected UnsupportedDataset, got {:?}", other),
        }
        assert!(DatasetFamily::parse_for("Omniglot", CORRUPTED_FAMILIES, "x").is_err());
    }

    #[test]
    fn test_normalization_channels() {
        assert_eq!(DatasetFamily::Mnist.normalization().unwrap().mean().len(), 1);
        assert_eq!(DatasetFamily::Cifar100.normalization().unwrap().std().len(), 3);
        assert!(DatasetFamily::SmallImagenet.normalization().is_none());
    }
}
