pub(super) mod ipgp;
